//! Event structures for matching results
//!
//! Records handed to settlement collaborators after a round is matched. They
//! mirror the matching pool contract's `Matched(poolId, amount)` event.

use qf_types::ids::{ProjectId, RoundId};
use qf_types::result::MatchReport;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Matching event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchingEvent {
    /// Summary of one allocation
    RoundMatched {
        round_id: Option<RoundId>,
        pool: Decimal,
        total_final_match: Decimal,
        scale_factor: Decimal,
        project_count: usize,
        computed_at: i64, // Unix nanos
    },
    /// Non-zero match owed to a project
    ProjectMatched {
        round_id: Option<RoundId>,
        project_id: ProjectId,
        amount: Decimal,
        contributor_count: usize,
    },
}

/// Events for a report: one `RoundMatched`, then one `ProjectMatched` per
/// project with a non-zero final match, in result order
pub fn from_report(report: &MatchReport, computed_at: i64) -> Vec<MatchingEvent> {
    let mut events = Vec::with_capacity(report.results.len() + 1);
    events.push(MatchingEvent::RoundMatched {
        round_id: report.round_id,
        pool: report.pool,
        total_final_match: report.total_final_match,
        scale_factor: report.scale_factor,
        project_count: report.results.len(),
        computed_at,
    });
    events.extend(
        report
            .results
            .iter()
            .filter(|r| !r.final_match.is_zero())
            .map(|r| MatchingEvent::ProjectMatched {
                round_id: report.round_id,
                project_id: r.project_id,
                amount: r.final_match,
                contributor_count: r.contributor_count,
            }),
    );
    events
}
