//! Matching output types
//!
//! Produced fresh on every compute call and never persisted by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{ProjectId, RoundId};

/// Match for a single project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub project_id: ProjectId,
    /// Quadratic subsidy before pool scaling
    pub raw_match: Decimal,
    /// Subsidy actually allocated from the pool
    pub final_match: Decimal,
    /// Distinct donors with a positive total
    pub contributor_count: usize,
    /// Sum of direct contributions
    pub total_raised: Decimal,
}

impl MatchResult {
    /// Direct contributions plus the matched subsidy
    pub fn total_funding(&self) -> Decimal {
        self.total_raised + self.final_match
    }
}

/// Results of one compute call plus allocation diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub round_id: Option<RoundId>,
    pub pool: Decimal,
    pub results: Vec<MatchResult>,
    pub total_raw_match: Decimal,
    pub total_final_match: Decimal,
    /// Factor applied to every raw match (1 when the pool covers demand)
    pub scale_factor: Decimal,
    pub scaled: bool,
    /// Projects whose match was limited by the per-project cap
    pub capped_projects: Vec<ProjectId>,
    /// Pool left undistributed
    pub unallocated: Decimal,
}

impl MatchReport {
    pub fn result_for(&self, project_id: &ProjectId) -> Option<&MatchResult> {
        self.results.iter().find(|r| &r.project_id == project_id)
    }

    pub fn total_raised(&self) -> Decimal {
        self.results.iter().map(|r| r.total_raised).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(project: u64, final_match: i64, raised: i64) -> MatchResult {
        MatchResult {
            project_id: ProjectId::new(project),
            raw_match: Decimal::from(final_match),
            final_match: Decimal::from(final_match),
            contributor_count: 2,
            total_raised: Decimal::from(raised),
        }
    }

    #[test]
    fn test_total_funding() {
        assert_eq!(result(1, 12, 4).total_funding(), Decimal::from(16));
    }

    #[test]
    fn test_report_lookup() {
        let report = MatchReport {
            round_id: None,
            pool: Decimal::from(20),
            results: vec![result(1, 12, 4), result(2, 0, 4)],
            total_raw_match: Decimal::from(12),
            total_final_match: Decimal::from(12),
            scale_factor: Decimal::ONE,
            scaled: false,
            capped_projects: vec![],
            unallocated: Decimal::from(8),
        };
        assert_eq!(report.result_for(&ProjectId::new(2)).unwrap().final_match, Decimal::ZERO);
        assert!(report.result_for(&ProjectId::new(3)).is_none());
        assert_eq!(report.total_raised(), Decimal::from(8));
        assert!(!report.is_empty());
    }
}
