//! Identity split scenario
//!
//! The same total given as repeat donations from one donor earns nothing,
//! while the same total split across many identities earns `total * (k - 1)`.
//! The engine aggregates by donor id; telling real donors from split
//! identities is left to the identity layer that supplies the ledger.

use matching_engine::MatchingEngine;
use qf_types::contribution::Contribution;
use qf_types::errors::MatchingError;
use qf_types::ids::{DonorId, ProjectId};
use qf_types::ledger::ProjectLedger;
use qf_types::numeric::{approx_eq, DEFAULT_TOLERANCE};
use rust_decimal::Decimal;

use crate::scenarios::ScenarioResult;

/// Configuration for the identity split scenario.
#[derive(Debug, Clone)]
pub struct SybilSplitConfig {
    /// Number of transactions / identities the total is split into
    pub splits: u32,
    /// Total given to each project
    pub total: Decimal,
    pub pool: Decimal,
}

impl Default for SybilSplitConfig {
    fn default() -> Self {
        Self {
            splits: 10,
            total: Decimal::from(100),
            pool: Decimal::from(1_000_000),
        }
    }
}

pub const REPEAT_PROJECT: ProjectId = ProjectId::new(1);
pub const SPLIT_PROJECT: ProjectId = ProjectId::new(2);

pub fn build_ledger(config: &SybilSplitConfig) -> ProjectLedger {
    let splits = config.splits.max(1);
    let share = config.total / Decimal::from(splits);
    let mut ledger = ProjectLedger::new();
    for _ in 0..splits {
        ledger.record(Contribution {
            project_id: REPEAT_PROJECT,
            donor_id: DonorId::new("donor"),
            amount: share,
        });
    }
    for i in 0..splits {
        ledger.record(Contribution {
            project_id: SPLIT_PROJECT,
            donor_id: DonorId::new(format!("identity-{i}")),
            amount: share,
        });
    }
    ledger
}

pub fn run(engine: &MatchingEngine, config: &SybilSplitConfig) -> Result<ScenarioResult, MatchingError> {
    let ledger = build_ledger(config);
    let report = engine.compute_report(&ledger, config.pool)?;
    let expected_split = config.total * Decimal::from(config.splits.max(1) - 1);

    let (passed, details) = match (report.result_for(&REPEAT_PROJECT), report.result_for(&SPLIT_PROJECT)) {
        (Some(repeat), Some(split)) => (
            repeat.raw_match.is_zero()
                && repeat.contributor_count == 1
                && approx_eq(split.raw_match, expected_split, DEFAULT_TOLERANCE),
            format!(
                "repeat donations raw match {}; {} identities raw match {} (expected {})",
                repeat.raw_match, split.contributor_count, split.raw_match, expected_split
            ),
        ),
        _ => (false, "missing project results".to_string()),
    };

    Ok(ScenarioResult::new("sybil_split", &ledger, passed, details))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sybil_split_passes() {
        let result = run(&MatchingEngine::default(), &SybilSplitConfig::default()).unwrap();
        assert!(result.passed, "{}", result.details);
    }

    #[test]
    fn test_uneven_split_share() {
        let config = SybilSplitConfig {
            splits: 3,
            total: Decimal::from(10),
            pool: Decimal::from(1_000),
        };
        let result = run(&MatchingEngine::default(), &config).unwrap();
        assert!(result.passed, "{}", result.details);
    }
}
