//! Allocation report
//!
//! Summarises how a round's pool was shared: per-project pool share, match
//! multiplier on direct donations, and a Herfindahl concentration index over
//! the matched amounts.

use qf_types::ids::ProjectId;
use qf_types::result::MatchReport;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-project allocation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAllocation {
    pub project_id: ProjectId,
    pub contributor_count: usize,
    pub total_raised: Decimal,
    pub final_match: Decimal,
    /// `final_match / pool`
    pub pool_share: Decimal,
    /// `final_match / total_raised`
    pub match_multiplier: Decimal,
}

/// Aggregated allocation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub pool: Decimal,
    pub total_raised: Decimal,
    pub total_matched: Decimal,
    pub unallocated: Decimal,
    pub scaled: bool,
    /// Σ share², where share is each project's fraction of the matched total.
    /// 1 means a single project took everything.
    pub herfindahl_index: Decimal,
    pub projects: Vec<ProjectAllocation>,
}

/// Build an allocation report, largest match first (ties keep ledger order)
pub fn analyze(report: &MatchReport) -> AllocationReport {
    let mut projects: Vec<ProjectAllocation> = report
        .results
        .iter()
        .map(|r| ProjectAllocation {
            project_id: r.project_id,
            contributor_count: r.contributor_count,
            total_raised: r.total_raised,
            final_match: r.final_match,
            pool_share: ratio(r.final_match, report.pool),
            match_multiplier: ratio(r.final_match, r.total_raised),
        })
        .collect();
    projects.sort_by(|a, b| b.final_match.cmp(&a.final_match));

    let herfindahl_index = projects
        .iter()
        .map(|p| {
            let share = ratio(p.final_match, report.total_final_match);
            share * share
        })
        .sum();

    AllocationReport {
        pool: report.pool,
        total_raised: report.total_raised(),
        total_matched: report.total_final_match,
        unallocated: report.unallocated,
        scaled: report.scaled,
        herfindahl_index,
        projects,
    }
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qf_types::result::MatchResult;

    fn result(project: u64, final_match: i64, raised: i64) -> MatchResult {
        MatchResult {
            project_id: ProjectId::new(project),
            raw_match: Decimal::from(final_match),
            final_match: Decimal::from(final_match),
            contributor_count: 3,
            total_raised: Decimal::from(raised),
        }
    }

    fn report(results: Vec<MatchResult>, pool: i64) -> MatchReport {
        let total: Decimal = results.iter().map(|r| r.final_match).sum();
        MatchReport {
            round_id: None,
            pool: Decimal::from(pool),
            results,
            total_raw_match: total,
            total_final_match: total,
            scale_factor: Decimal::ONE,
            scaled: false,
            capped_projects: vec![],
            unallocated: Decimal::from(pool) - total,
        }
    }

    #[test]
    fn test_allocation_sorted_and_shares() {
        let analysis = analyze(&report(vec![result(1, 20, 10), result(2, 60, 30)], 100));
        assert_eq!(analysis.projects[0].project_id, ProjectId::new(2));
        assert_eq!(analysis.projects[0].pool_share, Decimal::new(6, 1));
        assert_eq!(analysis.projects[1].match_multiplier, Decimal::from(2));
        assert_eq!(analysis.total_raised, Decimal::from(40));
        assert_eq!(analysis.unallocated, Decimal::from(20));
        // 0.75² + 0.25²
        assert_eq!(analysis.herfindahl_index, Decimal::new(625, 3));
    }

    #[test]
    fn test_single_winner_concentration() {
        let analysis = analyze(&report(vec![result(1, 10, 5), result(2, 0, 5)], 10));
        assert_eq!(analysis.herfindahl_index, Decimal::ONE);
    }

    #[test]
    fn test_zero_pool_has_no_shares() {
        let analysis = analyze(&report(vec![result(1, 0, 5)], 0));
        assert_eq!(analysis.projects[0].pool_share, Decimal::ZERO);
        assert_eq!(analysis.herfindahl_index, Decimal::ZERO);
    }
}
