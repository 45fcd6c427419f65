//! Quadratic Funding Matching Engine
//!
//! Computes how a fixed matching pool is shared between projects under
//! quadratic funding: each project's subsidy is the square of the sum of its
//! donors' square-rooted totals, minus what the donors already gave.
//!
//! **Key Invariants:**
//! - Deterministic and pure (same inputs → identical outputs)
//! - Repeat donations are aggregated per donor before the square root
//! - Total payout never exceeds the pool
//! - When scaling applies, every project scales by the same factor
//! - Output order follows ledger order

pub mod config;
pub mod matching;
pub mod engine;
pub mod payout;
pub mod events;

pub use config::MatchingConfig;
pub use engine::{compute, MatchingEngine};
pub use payout::{Payout, PayoutPlan};
