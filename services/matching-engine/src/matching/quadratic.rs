//! Quadratic subsidy term
//!
//! `raw = (Σ sqrt(c_i))² − Σ c_i`, the part of the quadratic total not
//! already covered by direct donations.

use qf_types::errors::InvalidInput;
use qf_types::numeric::{checked_sum, sqrt};
use rust_decimal::Decimal;

use super::aggregate::DonorTotal;

/// Per-project quantities derived from donor totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadraticTerms {
    pub raw_match: Decimal,
    pub total_raised: Decimal,
    pub contributor_count: usize,
}

/// Compute the quadratic subsidy for one project's donor totals
///
/// With zero or one donor the subsidy is exactly zero. Any negative residue
/// from decimal rounding is clamped to zero.
pub fn quadratic_match(donors: &[DonorTotal]) -> Result<QuadraticTerms, InvalidInput> {
    let positive: Vec<Decimal> = donors
        .iter()
        .map(|d| d.amount)
        .filter(|amount| *amount > Decimal::ZERO)
        .collect();

    let total_raised = checked_sum(positive.iter().copied()).ok_or_else(|| overflow("total raised"))?;
    let contributor_count = positive.len();

    if contributor_count <= 1 {
        return Ok(QuadraticTerms {
            raw_match: Decimal::ZERO,
            total_raised,
            contributor_count,
        });
    }

    let roots = positive
        .iter()
        .map(|amount| sqrt(*amount))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| overflow("square root"))?;
    let root_sum = checked_sum(roots).ok_or_else(|| overflow("sum of square roots"))?;
    let squared = root_sum
        .checked_mul(root_sum)
        .ok_or_else(|| overflow("squared sum of square roots"))?;

    Ok(QuadraticTerms {
        raw_match: (squared - total_raised).max(Decimal::ZERO),
        total_raised,
        contributor_count,
    })
}

fn overflow(context: &str) -> InvalidInput {
    InvalidInput::Overflow {
        context: context.to_string(),
    }
}
