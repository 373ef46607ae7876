//! Estimate result model.
//!
//! This module contains [`EstimateResult`], the immutable value returned by
//! the estimate calculator. Currency fields serialize as JSON numbers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RuleKind;

/// The full cost breakdown for one event booking.
///
/// Created fresh per calculation and never mutated afterwards.
///
/// `breakdown` and `summary` are presentation text; the numeric fields are
/// the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    /// Calendar year of the event, used for the rate lookup.
    pub year: i32,
    /// The event date as `YYYY-MM-DD`.
    pub date_key: String,
    /// Number of helpers booked.
    pub num_helpers: u32,
    /// Booked duration in hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_hours: Decimal,
    /// Hours beyond the base block.
    #[serde(with = "rust_decimal::serde::float")]
    pub extra_hours: Decimal,
    /// Base-block charge per helper for the year.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_per_helper: Decimal,
    /// Hourly charge per helper beyond the base block.
    #[serde(with = "rust_decimal::serde::float")]
    pub extra_per_hour_per_helper: Decimal,
    /// Base-block charge for all helpers.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_subtotal: Decimal,
    /// Extra-hours charge for all helpers.
    #[serde(with = "rust_decimal::serde::float")]
    pub extra_subtotal: Decimal,
    /// `base_subtotal + extra_subtotal`.
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal_before_adjustments: Decimal,
    /// True when a special-date rule was applied.
    pub is_special_date: bool,
    /// Label of the applied rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_label: Option<String>,
    /// Kind of the applied rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_type: Option<RuleKind>,
    /// Multiplier of the applied rule.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub special_multiplier: Option<Decimal>,
    /// Flat increase of the applied rule.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub special_flat_increase: Option<Decimal>,
    /// Final cost, rounded half-up to cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    /// Line item to formatted amount.
    pub breakdown: BTreeMap<String, String>,
    /// One-sentence description of the estimate.
    pub summary: String,
}
