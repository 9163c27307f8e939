//! Monetary amount scaling between decimal values and integer minor units
//!
//! Floating-point addition is neither associative nor exact for currency
//! values, so every solver in this crate sums scaled integers instead.
//! Scaling multiplies by the configured factor (100 = cents) and rounds
//! half away from zero. Precision finer than one minor unit is dropped by
//! the rounding step; that loss is an accepted part of the contract.

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};

use crate::types::{ReconcileError, ReconcileResult};

/// Convert a monetary value into integer minor units
///
/// Rounds half away from zero. Values whose scaled magnitude does not fit
/// in an `i64` are rejected with [`ReconcileError::AmountOutOfRange`].
pub fn scale_amount(amount: &BigDecimal, scale_factor: u32) -> ReconcileResult<i64> {
    let scaled = (amount * BigDecimal::from(scale_factor)).with_scale_round(0, RoundingMode::HalfUp);

    scaled
        .to_i64()
        .ok_or_else(|| ReconcileError::AmountOutOfRange(amount.to_string()))
}

/// Convert a sequence of monetary values into integer minor units
///
/// Fails on the first value that is out of range; partial conversions are
/// never returned.
pub fn scale_amounts(amounts: &[BigDecimal], scale_factor: u32) -> ReconcileResult<Vec<i64>> {
    amounts
        .iter()
        .map(|amount| scale_amount(amount, scale_factor))
        .collect()
}

/// Convert integer minor units back into a monetary value
pub fn descale_amount(minor_units: i64, scale_factor: u32) -> BigDecimal {
    BigDecimal::from(minor_units) / BigDecimal::from(scale_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_scale_two_decimal_amounts() {
        assert_eq!(scale_amount(&dec("12.34"), 100).unwrap(), 1234);
        assert_eq!(scale_amount(&dec("0.01"), 100).unwrap(), 1);
        assert_eq!(scale_amount(&dec("-45.60"), 100).unwrap(), -4560);
        assert_eq!(scale_amount(&dec("1000"), 100).unwrap(), 100000);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(scale_amount(&dec("12.345"), 100).unwrap(), 1235);
        assert_eq!(scale_amount(&dec("-12.345"), 100).unwrap(), -1235);
        assert_eq!(scale_amount(&dec("12.344"), 100).unwrap(), 1234);
        assert_eq!(scale_amount(&dec("12.346"), 100).unwrap(), 1235);
    }

    #[test]
    fn test_scaling_round_trip_for_two_decimal_values() {
        for raw in ["12.34", "-0.99", "0.00", "99999.01", "3.10"] {
            let value = dec(raw);
            let cents = scale_amount(&value, 100).unwrap();
            assert_eq!(descale_amount(cents, 100), value, "round trip for {raw}");
        }
    }

    #[test]
    fn test_out_of_range_amount_is_rejected() {
        let huge = dec("1e30");
        let result = scale_amount(&huge, 100);
        assert!(matches!(result, Err(ReconcileError::AmountOutOfRange(_))));
    }

    #[test]
    fn test_scale_amounts_fails_on_first_bad_value() {
        let amounts = vec![dec("10.00"), dec("1e30"), dec("20.00")];
        assert!(scale_amounts(&amounts, 100).is_err());

        let good = vec![dec("10.00"), dec("20.50")];
        assert_eq!(scale_amounts(&good, 100).unwrap(), vec![1000, 2050]);
    }

    #[test]
    fn test_descale_amount() {
        assert_eq!(descale_amount(1234, 100), dec("12.34"));
        assert_eq!(descale_amount(-50, 100), dec("-0.50"));
        assert_eq!(descale_amount(0, 100), dec("0"));
    }
}
