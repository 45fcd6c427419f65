//! Decimal helpers for monetary amounts
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Rounding for display or settlement happens at the payout boundary, never here.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Newton steps after the f64 seed; the seed already carries ~16 digits.
const SQRT_MAX_ITERATIONS: usize = 8;

/// Default tolerance for comparing derived amounts (1e-18).
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 18);

/// Square root of a non-negative decimal
///
/// Seeds from the IEEE-754 square root (correctly rounded, so identical on
/// every platform) and refines with a bounded number of Newton steps in
/// decimal arithmetic. Returns `None` for negative input.
pub fn sqrt(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }

    let two = Decimal::from(2);
    let mut root = value
        .to_f64()
        .map(f64::sqrt)
        .and_then(Decimal::from_f64)
        .filter(|seed| *seed > Decimal::ZERO)
        .unwrap_or(value);

    for _ in 0..SQRT_MAX_ITERATIONS {
        let quotient = value.checked_div(root)?;
        let next = root.checked_add(quotient)?.checked_div(two)?;
        if next == root {
            break;
        }
        root = next;
    }

    Some(root)
}

/// Absolute difference within `tolerance`
pub fn approx_eq(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

/// Sum that reports overflow instead of panicking
pub fn checked_sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sqrt_perfect_squares() {
        assert_eq!(sqrt(Decimal::from(4)), Some(Decimal::from(2)));
        assert_eq!(sqrt(Decimal::from(144)), Some(Decimal::from(12)));
        assert_eq!(sqrt(Decimal::ONE), Some(Decimal::ONE));
        assert_eq!(sqrt(Decimal::ZERO), Some(Decimal::ZERO));
    }

    #[test]
    fn test_sqrt_irrational() {
        let root = sqrt(Decimal::from(2)).unwrap();
        let expected = Decimal::from_str("1.4142135623730950488016887242").unwrap();
        assert!(approx_eq(root, expected, DEFAULT_TOLERANCE));
        assert!(approx_eq(root * root, Decimal::from(2), DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_sqrt_small_values() {
        let value = Decimal::from_str("0.0001").unwrap();
        assert!(approx_eq(
            sqrt(value).unwrap(),
            Decimal::from_str("0.01").unwrap(),
            DEFAULT_TOLERANCE
        ));
    }

    #[test]
    fn test_sqrt_negative() {
        assert_eq!(sqrt(Decimal::from(-5)), None);
    }

    #[test]
    fn test_sqrt_is_deterministic() {
        let value = Decimal::from_str("12345.6789").unwrap();
        assert_eq!(sqrt(value), sqrt(value));
    }

    #[test]
    fn test_checked_sum_overflow() {
        assert_eq!(checked_sum(vec![Decimal::ONE, Decimal::TEN]), Some(Decimal::from(11)));
        assert_eq!(checked_sum(vec![Decimal::MAX, Decimal::ONE]), None);
    }

    #[test]
    fn test_default_tolerance() {
        assert_eq!(DEFAULT_TOLERANCE, Decimal::from_str("0.000000000000000001").unwrap());
    }
}
