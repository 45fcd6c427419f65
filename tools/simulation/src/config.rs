//! Simulation run configuration
//!
//! Loaded from an optional JSON file; every field has a default.

use matching_engine::payout::WEI_DECIMALS;
use matching_engine::MatchingConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::generator::GeneratorConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed for the generated round
    pub seed: u64,
    /// Matching pool for the generated round
    pub pool: Decimal,
    /// Token precision used for the payout plan
    pub payout_decimals: u32,
    pub generator: GeneratorConfig,
    pub engine: MatchingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pool: Decimal::from(50_000),
            payout_decimals: WEI_DECIMALS,
            generator: GeneratorConfig::default(),
            engine: MatchingConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
