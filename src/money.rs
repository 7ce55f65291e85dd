//! Money Module
//!
//! Monetary values are exact `rust_decimal::Decimal` throughout. The persisted
//! layout is `DECIMAL(15,2)`: 13 integer digits and 2 fractional digits. All
//! scale checks and storage rounding go through this module.
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use transfer_scheduler::money::{check_amount, to_storage_scale, MoneyError};
//!
//! // 500.00 * 0.082 = 41.00000 keeps full scale until storage
//! assert_eq!(to_storage_scale(dec!(41.00000)).to_string(), "41.00");
//!
//! assert!(matches!(check_amount(dec!(1.005)), Err(MoneyError::PrecisionOverflow { .. })));
//! ```

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Fractional digits kept by the store
pub const MONEY_SCALE: u32 = 2;

/// Integer digits allowed by the store (15 total - 2 fractional)
pub const MAX_INTEGER_DIGITS: u32 = 13;

/// Smallest schedulable amount
pub const MIN_AMOUNT: Decimal = dec!(0.01);

/// Largest value that fits `DECIMAL(15,2)`
pub const MAX_STORABLE: Decimal = dec!(9999999999999.99);

// ============================================================================
// Error Types
// ============================================================================

/// Monetary scale errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount must be greater than zero")]
    BelowMinimum,

    #[error("Precision overflow: provided {provided} decimals, max allowed {max}")]
    PrecisionOverflow { provided: u32, max: u32 },

    #[error("Amount exceeds {max} integer digits")]
    TooManyIntegerDigits { max: u32 },
}

// ============================================================================
// Checks
// ============================================================================

/// Check that a client amount can be scheduled and stored without rounding.
///
/// Trailing zeros do not count against the scale (`1.500` is accepted).
pub fn check_amount(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount < MIN_AMOUNT {
        return Err(MoneyError::BelowMinimum);
    }

    let normalized = amount.normalize();
    if normalized.scale() > MONEY_SCALE {
        return Err(MoneyError::PrecisionOverflow {
            provided: normalized.scale(),
            max: MONEY_SCALE,
        });
    }

    if normalized.trunc() > MAX_STORABLE.trunc() {
        return Err(MoneyError::TooManyIntegerDigits {
            max: MAX_INTEGER_DIGITS,
        });
    }

    Ok(to_storage_scale(amount))
}

/// Round to the storage scale.
///
/// NUMERIC columns round half away from zero, so the in-memory store and the
/// PostgreSQL store end up with the same value for the same fee.
pub fn to_storage_scale(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount_accepts_minimum() {
        assert_eq!(check_amount(dec!(0.01)).unwrap(), dec!(0.01));
    }

    #[test]
    fn test_check_amount_rescales_to_two_digits() {
        let checked = check_amount(dec!(1000)).unwrap();
        assert_eq!(checked.scale(), 2);
        assert_eq!(checked.to_string(), "1000.00");
    }

    #[test]
    fn test_check_amount_rejects_below_minimum() {
        assert_eq!(check_amount(dec!(0.009)), Err(MoneyError::BelowMinimum));
        assert_eq!(check_amount(Decimal::ZERO), Err(MoneyError::BelowMinimum));
        assert_eq!(check_amount(dec!(-5)), Err(MoneyError::BelowMinimum));
    }

    #[test]
    fn test_check_amount_ignores_trailing_zeros() {
        assert_eq!(check_amount(dec!(1.500)).unwrap().to_string(), "1.50");
    }

    #[test]
    fn test_check_amount_rejects_third_decimal() {
        assert_eq!(
            check_amount(dec!(10.005)),
            Err(MoneyError::PrecisionOverflow {
                provided: 3,
                max: 2
            })
        );
    }

    #[test]
    fn test_check_amount_integer_digit_boundary() {
        assert!(check_amount(dec!(9999999999999.99)).is_ok());
        assert_eq!(
            check_amount(dec!(10000000000000)),
            Err(MoneyError::TooManyIntegerDigits { max: 13 })
        );
    }

    #[test]
    fn test_storage_rounding_half_away_from_zero() {
        assert_eq!(to_storage_scale(dec!(0.005)).to_string(), "0.01");
        assert_eq!(to_storage_scale(dec!(0.0049)).to_string(), "0.00");
        assert_eq!(to_storage_scale(dec!(17.0850)).to_string(), "17.09");
    }
}
