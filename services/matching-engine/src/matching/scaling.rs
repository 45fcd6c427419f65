//! Pool scaling and per-project caps
//!
//! When demand exceeds the pool every raw match is scaled by the same
//! factor `pool / Σ raw`; otherwise raw matches are paid exactly.
//!
//! Scaled shares are truncated toward zero at [`share_scale`] places, so
//! their sum is exact and never exceeds the pool.

use qf_types::errors::InvalidInput;
use qf_types::numeric::checked_sum;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Integer plus fractional digits a scaled share may carry. One digit below
/// the 28-digit Decimal limit leaves headroom for summing shares exactly.
const SHARE_DIGITS: u32 = 27;

/// Final matches in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub final_matches: Vec<Decimal>,
    pub total_raw_match: Decimal,
    pub scale_factor: Decimal,
    pub scaled: bool,
}

/// Scale raw matches so their sum never exceeds `pool`
pub fn scale_to_pool(raw_matches: &[Decimal], pool: Decimal) -> Result<Allocation, InvalidInput> {
    let total_raw_match = checked_sum(raw_matches.iter().copied()).ok_or_else(|| InvalidInput::Overflow {
        context: "total raw match".to_string(),
    })?;

    if total_raw_match <= pool {
        return Ok(Allocation {
            final_matches: raw_matches.to_vec(),
            total_raw_match,
            scale_factor: Decimal::ONE,
            scaled: false,
        });
    }

    // total_raw_match > pool >= 0, so the divisor is positive
    let scale_factor = pool / total_raw_match;
    let scale = share_scale(pool);
    let mut final_matches = raw_matches
        .iter()
        .map(|raw| {
            pro_rata(*raw, pool, total_raw_match, scale_factor)
                .map(|share| share.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
        })
        .collect::<Result<Vec<_>, _>>()?;
    trim_excess(&mut final_matches, pool, scale)?;

    Ok(Allocation {
        final_matches,
        total_raw_match,
        scale_factor,
        scaled: true,
    })
}

/// `raw * pool / total`, multiplying first so integral shares stay exact
fn pro_rata(raw: Decimal, pool: Decimal, total: Decimal, factor: Decimal) -> Result<Decimal, InvalidInput> {
    raw.checked_mul(pool)
        .and_then(|product| product.checked_div(total))
        .or_else(|| raw.checked_mul(factor))
        .ok_or_else(|| InvalidInput::Overflow {
            context: "pro-rata match".to_string(),
        })
}

/// Decimal places kept on scaled shares for a given pool
pub fn share_scale(pool: Decimal) -> u32 {
    SHARE_DIGITS.saturating_sub(integer_digits(pool))
}

fn integer_digits(value: Decimal) -> u32 {
    value
        .trunc()
        .normalize()
        .mantissa()
        .unsigned_abs()
        .checked_ilog10()
        .map_or(0, |digits| digits + 1)
}

/// Take any excess over the pool off the largest shares
///
/// Truncation keeps every share at or below the 28-digit quotient, but that
/// quotient may itself have rounded up past a truncation boundary.
fn trim_excess(shares: &mut [Decimal], pool: Decimal, scale: u32) -> Result<(), InvalidInput> {
    let total = checked_sum(shares.iter().copied()).ok_or_else(|| InvalidInput::Overflow {
        context: "total final match".to_string(),
    })?;
    if total <= pool {
        return Ok(());
    }

    let mut excess = (total - pool).round_dp_with_strategy(scale, RoundingStrategy::AwayFromZero);
    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| shares[b].cmp(&shares[a]));
    for i in order {
        if excess.is_zero() {
            break;
        }
        let take = excess.min(shares[i]);
        shares[i] -= take;
        excess -= take;
    }
    Ok(())
}

/// Limit each final match to `cap` of the pool; returns indices that were capped
///
/// The excess is left unallocated.
pub fn apply_cap(final_matches: &mut [Decimal], pool: Decimal, cap: Decimal) -> Vec<usize> {
    let ceiling = pool * cap;
    let mut capped = Vec::new();
    for (i, amount) in final_matches.iter_mut().enumerate() {
        if *amount > ceiling {
            *amount = ceiling;
            capped.push(i);
        }
    }
    capped
}
