//! Engine configuration

use qf_types::errors::InvalidInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for the matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Per-project ceiling as a fraction of the pool, within (0, 1].
    /// `None` leaves matches uncapped.
    pub match_cap: Option<Decimal>,
    /// Project count above which per-project work is split across threads.
    pub parallel_threshold: usize,
    /// Upper bound on worker threads for the parallel path.
    pub max_workers: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            match_cap: None,
            parallel_threshold: 1024,
            max_workers: 8,
        }
    }
}

impl MatchingConfig {
    /// Reject settings the engine cannot honour
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if let Some(cap) = self.match_cap {
            if cap <= Decimal::ZERO || cap > Decimal::ONE {
                return Err(InvalidInput::InvalidMatchCap { cap: cap.to_string() });
            }
        }
        if self.max_workers == 0 {
            return Err(InvalidInput::InvalidWorkerCount);
        }
        Ok(())
    }

    pub fn with_match_cap(mut self, cap: Decimal) -> Self {
        self.match_cap = Some(cap);
        self
    }

    /// Always take the sequential path
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            max_workers: 1,
            ..Self::default()
        }
    }
}
