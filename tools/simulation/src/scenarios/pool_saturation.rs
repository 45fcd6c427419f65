//! Pool saturation scenario
//!
//! Sweeps the pool from empty to well above demand on one ledger and checks
//! conservation, exact pass-through once demand is covered, and uniform
//! scaling below that.

use matching_engine::matching::share_scale;
use matching_engine::MatchingEngine;
use qf_types::errors::MatchingError;
use qf_types::ledger::ProjectLedger;
use qf_types::numeric::{approx_eq, DEFAULT_TOLERANCE};
use qf_types::result::MatchReport;
use rust_decimal::Decimal;
use tracing::debug;

use crate::scenarios::ScenarioResult;

/// Pool sizes as percentages of total demand.
pub const SWEEP_PERCENT: [i64; 6] = [0, 25, 50, 100, 150, 400];

pub fn run(engine: &MatchingEngine, ledger: &ProjectLedger) -> Result<ScenarioResult, MatchingError> {
    // A zero pool still reports the unscaled demand
    let demand = engine.compute_report(ledger, Decimal::ZERO)?.total_raw_match;

    let mut failures = Vec::new();
    for percent in SWEEP_PERCENT {
        let pool = demand * Decimal::new(percent, 2);
        let report = engine.compute_report(ledger, pool)?;
        debug!(percent, pool = %pool, scaled = report.scaled, "Pool sweep step");
        if let Some(problem) = check(&report) {
            failures.push(format!("{percent}% pool: {problem}"));
        }
    }

    let passed = failures.is_empty();
    let details = if passed {
        format!("demand {demand}; {} pool sizes checked", SWEEP_PERCENT.len())
    } else {
        failures.join("; ")
    };
    Ok(ScenarioResult::new("pool_saturation", ledger, passed, details))
}

fn check(report: &MatchReport) -> Option<String> {
    if report.total_final_match > report.pool {
        return Some(format!("paid {} from pool {}", report.total_final_match, report.pool));
    }
    // Shares are truncated at `share_scale` places, and trimming may move a
    // few more units of that scale
    let slack = Decimal::new(report.results.len() as i64 + 1, share_scale(report.pool));
    let tolerance = DEFAULT_TOLERANCE.max(slack);
    for result in &report.results {
        if report.capped_projects.contains(&result.project_id) {
            continue;
        }
        if report.scaled {
            let expected = result.raw_match * report.scale_factor;
            if !approx_eq(result.final_match, expected, tolerance) {
                return Some(format!("project {} off the common scale factor", result.project_id));
            }
        } else if result.final_match != result.raw_match {
            return Some(format!("project {} scaled although pool covers demand", result.project_id));
        }
    }
    None
}
