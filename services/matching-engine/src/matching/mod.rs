//! Matching logic module
//!
//! Implements the quadratic funding allocation: per-donor aggregation,
//! the quadratic subsidy term, then pool scaling and caps.

pub mod aggregate;
pub mod quadratic;
pub mod scaling;

pub use aggregate::{aggregate_project, DonorTotal};
pub use quadratic::{quadratic_match, QuadraticTerms};
pub use scaling::{apply_cap, scale_to_pool, share_scale, Allocation};
