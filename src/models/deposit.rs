//! Deposit calculation models.
//!
//! All amounts here are whole cents. The `min_amount`, `max_amount` and
//! `target_amount` fields are the raw percentage-derived bounds and are not
//! lattice amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The outcome of quantizing a deposit onto the professional-amount lattice.
///
/// # Example
///
/// ```
/// use event_pricing::models::DepositCalculation;
/// use rust_decimal::Decimal;
///
/// let calculation = DepositCalculation {
///     value: 25_000,
///     percentage: Decimal::new(250, 1),
///     min_amount: Decimal::new(15_000, 0),
///     max_amount: Decimal::new(30_000, 0),
///     target_amount: Decimal::new(22_500, 0),
///     floored_amount: 20_000,
///     picked_by: "calculated_25.0%_of_estimate".to_string(),
/// };
/// assert_eq!(calculation.value % 5_000, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositCalculation {
    /// The selected deposit in cents.
    pub value: i64,
    /// `value / estimate * 100`, rounded to one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    /// Estimate times the minimum percentage, in cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub min_amount: Decimal,
    /// Estimate times the maximum percentage, in cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub max_amount: Decimal,
    /// Estimate times the target percentage, in cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub target_amount: Decimal,
    /// Largest lattice amount not above the target, or the lattice floor.
    pub floored_amount: i64,
    /// Audit string recording how the value was chosen.
    pub picked_by: String,
}

/// A deposit ready to invoice, either calculated or manually overridden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositQuote {
    /// The deposit in cents.
    pub deposit_cents: i64,
    /// Deposit as a percentage of the estimate, one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    /// Audit string; `manual_override` for overrides.
    pub picked_by: String,
    /// True when the caller supplied the amount.
    pub is_manual_override: bool,
    /// The lattice calculation, absent for manual overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<DepositCalculation>,
}
