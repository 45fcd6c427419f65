//! Simulation export
//!
//! Serializes a run's generated round, allocation and scenario outcomes to
//! JSON for external consumption.

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use crate::reports::AllocationReport;
use crate::scenarios::ScenarioResult;

/// Shape of the generated round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub seed: u64,
    pub projects: usize,
    pub contributions: usize,
    pub matched_projects: usize,
}

/// Payout totals at the configured precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutSummary {
    pub decimals: u32,
    pub payouts: usize,
    pub total_paid: Decimal,
    pub dust: Decimal,
}

/// Combined export containing all simulation outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationExport {
    pub version: String,
    pub round: RoundSummary,
    pub allocation: AllocationReport,
    pub payouts: PayoutSummary,
    pub scenarios: Vec<ScenarioResult>,
}

impl SimulationExport {
    pub fn all_scenarios_passed(&self) -> bool {
        self.scenarios.iter().all(|s| s.passed)
    }
}

/// Export complete simulation data as JSON.
pub fn export_json(export: &SimulationExport) -> String {
    serde_json::to_string_pretty(export).unwrap_or_default()
}

/// Write export to a file path.
pub fn write_to_file(export: &SimulationExport, path: &str) -> std::io::Result<()> {
    std::fs::write(path, export_json(export))
}
