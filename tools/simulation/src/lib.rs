//! Simulation framework for quadratic funding rounds
//!
//! Generates seeded rounds, runs them through the matching engine, and
//! checks the defining properties of quadratic funding under controlled
//! scenarios.
//!
//! # Modules
//! - `generator`: Seeded contribution ledger generator
//! - `scenarios`: Broad support, identity split and pool saturation scenarios
//! - `reports`: Allocation and concentration report
//! - `config`: Run configuration
//! - `export`: JSON export

pub mod config;
pub mod generator;
pub mod scenarios;
pub mod reports;
pub mod export;

use chrono::{Duration, Utc};
use matching_engine::{MatchingEngine, PayoutPlan};
use qf_types::errors::MatchingError;
use qf_types::ledger::ProjectLedger;
use qf_types::round::MatchingRound;
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::export::{PayoutSummary, RoundSummary, SimulationExport};
use crate::generator::RoundGenerator;

/// Crate version constant
pub const VERSION: &str = "1.0.0";

/// Length of a simulated round
const ROUND_DAYS: i64 = 14;

/// Generate a round, run it through its lifecycle, settle it, and run
/// every scenario
pub fn run(config: &SimulationConfig) -> Result<SimulationExport, MatchingError> {
    let engine = MatchingEngine::new(config.engine.clone())?;
    let generated = RoundGenerator::new(config.generator.clone(), config.seed).generate();
    info!(
        seed = config.seed,
        projects = generated.len(),
        contributions = generated.contribution_count(),
        "Generated round"
    );

    let starts_at = Utc::now();
    let mut round = MatchingRound::new(
        format!("simulation-{}", config.seed),
        config.pool,
        starts_at,
        starts_at + Duration::days(ROUND_DAYS),
    )?;
    for project_id in generated.project_ids() {
        round.add_project(project_id)?;
    }
    round.open()?;

    let mut ledger = ProjectLedger::new();
    for project_id in generated.project_ids() {
        ledger.register_project(project_id);
    }
    for entry in generated.entries() {
        for contribution in &entry.contributions {
            round.check_contribution(contribution)?;
            ledger.record(contribution.clone());
        }
    }
    round.close()?;

    let report = engine.finalize_round(&round, &ledger)?;
    let plan = PayoutPlan::from_report(&report, config.payout_decimals)?;
    let allocation = reports::allocation::analyze(&report);

    let scenarios = scenarios::run_all(&engine, &ledger)?;
    for scenario in &scenarios {
        if scenario.passed {
            info!(scenario = %scenario.name, details = %scenario.details, "Scenario passed");
        } else {
            warn!(scenario = %scenario.name, details = %scenario.details, "Scenario failed");
        }
    }

    Ok(SimulationExport {
        version: VERSION.to_string(),
        round: RoundSummary {
            seed: config.seed,
            projects: ledger.len(),
            contributions: ledger.contribution_count(),
            matched_projects: report.results.len(),
        },
        allocation,
        payouts: PayoutSummary {
            decimals: plan.decimals,
            payouts: plan.payouts.len(),
            total_paid: plan.total_paid,
            dust: plan.dust,
        },
        scenarios,
    })
}
