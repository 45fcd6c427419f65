//! Broad support scenario
//!
//! Two projects raise the same amount: one from many small donors, one from
//! a single whale. Only the broadly supported project earns a subsidy.

use matching_engine::MatchingEngine;
use qf_types::contribution::Contribution;
use qf_types::errors::MatchingError;
use qf_types::ids::{DonorId, ProjectId};
use qf_types::ledger::ProjectLedger;
use rust_decimal::Decimal;

use crate::scenarios::ScenarioResult;

/// Configuration for the broad support scenario.
#[derive(Debug, Clone)]
pub struct BroadSupportConfig {
    /// Donors backing the community project
    pub small_donors: usize,
    /// Donation from each small donor
    pub small_amount: Decimal,
    pub pool: Decimal,
}

impl Default for BroadSupportConfig {
    fn default() -> Self {
        Self {
            small_donors: 100,
            small_amount: Decimal::ONE,
            pool: Decimal::from(1_000),
        }
    }
}

pub const COMMUNITY_PROJECT: ProjectId = ProjectId::new(1);
pub const WHALE_PROJECT: ProjectId = ProjectId::new(2);

pub fn build_ledger(config: &BroadSupportConfig) -> ProjectLedger {
    let mut ledger = ProjectLedger::new();
    for i in 0..config.small_donors {
        ledger.record(Contribution {
            project_id: COMMUNITY_PROJECT,
            donor_id: DonorId::new(format!("supporter-{i}")),
            amount: config.small_amount,
        });
    }
    ledger.record(Contribution {
        project_id: WHALE_PROJECT,
        donor_id: DonorId::new("whale"),
        amount: config.small_amount * Decimal::from(config.small_donors as u64),
    });
    ledger
}

pub fn run(engine: &MatchingEngine, config: &BroadSupportConfig) -> Result<ScenarioResult, MatchingError> {
    let ledger = build_ledger(config);
    let report = engine.compute_report(&ledger, config.pool)?;

    let community = report.result_for(&COMMUNITY_PROJECT);
    let whale = report.result_for(&WHALE_PROJECT);
    let (passed, details) = match (community, whale) {
        (Some(community), Some(whale)) => (
            community.final_match > whale.final_match && whale.raw_match.is_zero(),
            format!(
                "community raised {} from {} donors and matched {}; whale raised {} and matched {}",
                community.total_raised,
                community.contributor_count,
                community.final_match,
                whale.total_raised,
                whale.final_match
            ),
        ),
        _ => (false, "missing project results".to_string()),
    };

    Ok(ScenarioResult::new("broad_support", &ledger, passed, details))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broad_support_passes() {
        let result = run(&MatchingEngine::default(), &BroadSupportConfig::default()).unwrap();
        assert!(result.passed, "{}", result.details);
        assert_eq!(result.contributions, 101);
    }

    #[test]
    fn test_spec_sized_round() {
        let config = BroadSupportConfig {
            small_donors: 4,
            small_amount: Decimal::ONE,
            pool: Decimal::from(10),
        };
        let report = MatchingEngine::default()
            .compute_report(&build_ledger(&config), config.pool)
            .unwrap();
        assert_eq!(report.result_for(&COMMUNITY_PROJECT).unwrap().final_match, Decimal::from(10));
        assert_eq!(report.result_for(&WHALE_PROJECT).unwrap().final_match, Decimal::ZERO);
    }
}
