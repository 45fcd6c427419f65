//! Settlement payouts
//!
//! Converts final matches into token base units. This is the only place
//! amounts are rounded, and rounding is always toward zero so the plan never
//! pays out more than the pool.

use qf_types::errors::InvalidInput;
use qf_types::ids::{ProjectId, RoundId};
use qf_types::result::MatchReport;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest scale a Decimal can carry.
pub const MAX_DECIMALS: u32 = 28;

/// Common precision for 18-decimal tokens (ETH and most ERC-20s)
pub const WEI_DECIMALS: u32 = 18;

/// Amount owed to one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub project_id: ProjectId,
    /// Final match rounded toward zero at the plan's precision
    pub amount: Decimal,
    /// Same amount in integer base units
    #[serde(with = "u128_string")]
    pub base_units: u128,
}

/// Rounded payouts for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutPlan {
    pub round_id: Option<RoundId>,
    pub decimals: u32,
    pub payouts: Vec<Payout>,
    pub total_paid: Decimal,
    /// Value lost to rounding: `total_final_match - total_paid`
    pub dust: Decimal,
}

impl PayoutPlan {
    /// Round every non-zero final match to `decimals` places
    ///
    /// Projects whose match rounds to zero are omitted. Payouts are also
    /// limited to what is left of `report.pool`, so a hand-built report whose
    /// matches overshoot the pool still settles within it.
    pub fn from_report(report: &MatchReport, decimals: u32) -> Result<Self, InvalidInput> {
        if decimals > MAX_DECIMALS {
            return Err(InvalidInput::UnsupportedPrecision {
                decimals,
                max: MAX_DECIMALS,
            });
        }

        let mut payouts = Vec::new();
        let mut total_paid = Decimal::ZERO;
        for result in &report.results {
            let remaining = (report.pool - total_paid).round_dp_with_strategy(decimals, RoundingStrategy::ToZero);
            let amount = result
                .final_match
                .round_dp_with_strategy(decimals, RoundingStrategy::ToZero)
                .min(remaining);
            if amount <= Decimal::ZERO {
                continue;
            }
            total_paid += amount;
            payouts.push(Payout {
                project_id: result.project_id,
                amount,
                base_units: to_base_units(amount, decimals)?,
            });
        }

        Ok(Self {
            round_id: report.round_id,
            decimals,
            payouts,
            total_paid,
            dust: report.total_final_match - total_paid,
        })
    }

    pub fn total_base_units(&self) -> u128 {
        self.payouts.iter().map(|p| p.base_units).sum()
    }
}

/// Integer base units of an amount already rounded to `decimals` places
fn to_base_units(amount: Decimal, decimals: u32) -> Result<u128, InvalidInput> {
    let mantissa = amount.mantissa().to_u128().ok_or_else(|| InvalidInput::Overflow {
        context: format!("base units of {amount}"),
    })?;
    let shift = decimals.saturating_sub(amount.scale());
    10u128
        .checked_pow(shift)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| InvalidInput::Overflow {
            context: format!("base units of {amount}"),
        })
}

/// Base units exceed JSON's safe integer range, so they travel as strings.
mod u128_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
