//! Scenario simulation modules
//!
//! Each scenario exercises one defining property of quadratic funding.

pub mod broad_support;
pub mod sybil_split;
pub mod pool_saturation;

use matching_engine::MatchingEngine;
use qf_types::errors::MatchingError;
use qf_types::ledger::ProjectLedger;
use serde::{Deserialize, Serialize};

/// Result of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub projects: usize,
    pub contributions: usize,
    pub passed: bool,
    pub details: String,
}

impl ScenarioResult {
    fn new(name: &str, ledger: &ProjectLedger, passed: bool, details: String) -> Self {
        Self {
            name: name.to_string(),
            projects: ledger.len(),
            contributions: ledger.contribution_count(),
            passed,
            details,
        }
    }
}

/// Run every scenario with default settings; `ledger` drives pool saturation
pub fn run_all(engine: &MatchingEngine, ledger: &ProjectLedger) -> Result<Vec<ScenarioResult>, MatchingError> {
    Ok(vec![
        broad_support::run(engine, &broad_support::BroadSupportConfig::default())?,
        sybil_split::run(engine, &sybil_split::SybilSplitConfig::default())?,
        pool_saturation::run(engine, ledger)?,
    ])
}
