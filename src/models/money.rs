//! Currency helpers.
//!
//! Human-facing amounts are dollars held as [`Decimal`]; deposit arithmetic
//! runs in whole cents. These helpers are the only place the two meet.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to 2 decimal places, half away from zero.
///
/// # Example
///
/// ```
/// use event_pricing::models::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts dollars to whole cents, rounding half away from zero.
///
/// Values beyond the `i64` range saturate.
///
/// # Example
///
/// ```
/// use event_pricing::models::dollars_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(dollars_to_cents(Decimal::from_str("1000.00").unwrap()), 100_000);
/// assert_eq!(dollars_to_cents(Decimal::from_str("12.345").unwrap()), 1_235);
/// ```
pub fn dollars_to_cents(dollars: Decimal) -> i64 {
    let saturated = if dollars.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };
    dollars
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .unwrap_or(saturated)
}

/// Converts whole cents to dollars.
pub fn cents_to_dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
