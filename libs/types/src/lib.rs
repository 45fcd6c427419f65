//! Types library for quadratic funding rounds
//!
//! This library provides the core type definitions shared by the matching
//! engine and the simulation tooling, with deterministic decimal arithmetic
//! throughout.
//!
//! # Modules
//! - `ids`: Identifiers (ProjectId, DonorId, RoundId)
//! - `numeric`: Decimal helpers (square root, tolerant comparison)
//! - `contribution`: Donation records
//! - `ledger`: Ordered per-project contribution ledger
//! - `round`: Round lifecycle and eligibility
//! - `result`: Match results and allocation reports
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod contribution;
pub mod ledger;
pub mod round;
pub mod result;
pub mod errors;

pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::contribution::*;
    pub use crate::ledger::*;
    pub use crate::round::*;
    pub use crate::result::*;
    pub use crate::errors::*;
}
