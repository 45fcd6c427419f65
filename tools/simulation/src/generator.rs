//! Seeded round generator
//!
//! Produces realistic contribution ledgers: a long tail of small donors,
//! a handful of whales, and uneven project popularity. Identical seeds give
//! identical ledgers.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use qf_types::contribution::Contribution;
use qf_types::ids::{DonorId, ProjectId};
use qf_types::ledger::ProjectLedger;

/// Configuration for generated rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of eligible projects
    pub projects: usize,
    /// Number of distinct donors
    pub donors: usize,
    /// Donations each donor makes (projects may repeat)
    pub donations_per_donor: usize,
    /// Minimum donation size
    pub min_amount: Decimal,
    /// Maximum donation size for ordinary donors
    pub max_amount: Decimal,
    /// Probability that a donor is a whale (0.0 to 1.0)
    pub whale_ratio: f64,
    /// Whale donations are ordinary donations times this factor
    pub whale_multiplier: u32,
    /// Zipf-like exponent for project popularity (0 = uniform)
    pub popularity_skew: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            projects: 20,
            donors: 500,
            donations_per_donor: 3,
            min_amount: Decimal::ONE,
            max_amount: Decimal::from(100),
            whale_ratio: 0.02,
            whale_multiplier: 50,
            popularity_skew: 1.0,
        }
    }
}

/// Round generator with deterministic seeded RNG.
pub struct RoundGenerator {
    pub config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl RoundGenerator {
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a ledger; projects are registered in id order first
    pub fn generate(&mut self) -> ProjectLedger {
        let mut ledger = ProjectLedger::new();
        for project in 0..self.config.projects {
            ledger.register_project(ProjectId::new(project as u64));
        }
        if self.config.projects == 0 {
            return ledger;
        }

        let weights: Vec<f64> = (0..self.config.projects)
            .map(|i| 1.0 / ((i + 1) as f64).powf(self.config.popularity_skew.max(0.0)))
            .collect();
        let popularity = match WeightedIndex::new(&weights) {
            Ok(dist) => dist,
            Err(_) => return ledger,
        };

        let min_cents = to_cents(self.config.min_amount).max(1);
        let max_cents = to_cents(self.config.max_amount).max(min_cents);
        let whale_ratio = self.config.whale_ratio.clamp(0.0, 1.0);

        for donor in 0..self.config.donors {
            let donor_id = DonorId::new(format!("0x{donor:040x}"));
            let is_whale = self.rng.gen_bool(whale_ratio);
            for _ in 0..self.config.donations_per_donor {
                let project = popularity.sample(&mut self.rng);
                let mut cents = self.rng.gen_range(min_cents..=max_cents);
                if is_whale {
                    cents = cents.saturating_mul(i64::from(self.config.whale_multiplier.max(1)));
                }
                ledger.record(Contribution {
                    project_id: ProjectId::new(project as u64),
                    donor_id: donor_id.clone(),
                    amount: Decimal::new(cents, 2),
                });
            }
        }

        ledger
    }
}

fn to_cents(amount: Decimal) -> i64 {
    (amount * Decimal::ONE_HUNDRED).trunc().to_i64().unwrap_or(0)
}
