//! Report modules for simulation output

pub mod allocation;

pub use allocation::{AllocationReport, ProjectAllocation};
