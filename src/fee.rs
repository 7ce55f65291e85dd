//! Scheduling fee calculation
//!
//! The fee depends only on the amount and on the lead time, i.e. the number of
//! whole calendar days between the processing date and the transfer date.
//!
//! | lead days | fee                    |
//! |-----------|------------------------|
//! | < 0       | not applicable         |
//! | 0         | 3.00 + amount * 2.5%   |
//! | 1..=10    | 12.00                  |
//! | 11..=20   | amount * 8.2%          |
//! | 21..=30   | amount * 6.9%          |
//! | 31..=40   | amount * 4.7%          |
//! | 41..=50   | amount * 1.7%          |
//! | > 50      | not applicable         |
//!
//! All rates are exact decimals. The returned fee keeps the full scale of the
//! multiplication; rounding to the storage scale happens in [`crate::money`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// How a band turns an amount into a fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeRule {
    /// `fixed + amount * rate`
    FixedPlusRate { fixed: Decimal, rate: Decimal },
    /// Flat fee regardless of amount
    Flat(Decimal),
    /// `amount * rate`
    Rate(Decimal),
}

impl FeeRule {
    #[inline]
    pub fn apply(&self, amount: Decimal) -> Decimal {
        match *self {
            FeeRule::FixedPlusRate { fixed, rate } => fixed + amount * rate,
            FeeRule::Flat(fee) => fee,
            FeeRule::Rate(rate) => amount * rate,
        }
    }
}

/// Inclusive lead-day range with its fee rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBand {
    pub min_days: i64,
    pub max_days: i64,
    pub rule: FeeRule,
}

impl FeeBand {
    #[inline]
    pub fn contains(&self, lead_days: i64) -> bool {
        (self.min_days..=self.max_days).contains(&lead_days)
    }
}

/// Longest lead time that still has a fee
pub const MAX_LEAD_DAYS: i64 = 50;

/// Fee bands, ordered by lead time. First match wins.
pub const FEE_BANDS: [FeeBand; 6] = [
    FeeBand {
        min_days: 0,
        max_days: 0,
        rule: FeeRule::FixedPlusRate {
            fixed: dec!(3.00),
            rate: dec!(0.025),
        },
    },
    FeeBand {
        min_days: 1,
        max_days: 10,
        rule: FeeRule::Flat(dec!(12.00)),
    },
    FeeBand {
        min_days: 11,
        max_days: 20,
        rule: FeeRule::Rate(dec!(0.082)),
    },
    FeeBand {
        min_days: 21,
        max_days: 30,
        rule: FeeRule::Rate(dec!(0.069)),
    },
    FeeBand {
        min_days: 31,
        max_days: 40,
        rule: FeeRule::Rate(dec!(0.047)),
    },
    FeeBand {
        min_days: 41,
        max_days: MAX_LEAD_DAYS,
        rule: FeeRule::Rate(dec!(0.017)),
    },
];

/// Whole calendar days from `today` to `transfer_date` (negative if in the past).
#[inline]
pub fn lead_days(today: NaiveDate, transfer_date: NaiveDate) -> i64 {
    transfer_date.signed_duration_since(today).num_days()
}

/// Find the band covering `lead_days`.
pub fn band_for(lead_days: i64) -> Option<&'static FeeBand> {
    FEE_BANDS.iter().find(|band| band.contains(lead_days))
}

/// Calculate the scheduling fee.
///
/// Returns `None` when no fee applies (lead time negative or beyond
/// [`MAX_LEAD_DAYS`]). A transfer without a fee must not be scheduled.
///
/// # Example
/// ```
/// use rust_decimal_macros::dec;
/// use transfer_scheduler::fee::calculate_fee;
///
/// // Same-day: 3.00 + 1000.00 * 2.5% = 28.00
/// assert_eq!(calculate_fee(dec!(1000.00), 0), Some(dec!(28.00)));
/// assert_eq!(calculate_fee(dec!(200.00), 60), None);
/// ```
#[inline]
pub fn calculate_fee(amount: Decimal, lead_days: i64) -> Option<Decimal> {
    band_for(lead_days).map(|band| band.rule.apply(amount))
}
