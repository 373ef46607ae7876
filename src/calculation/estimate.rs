//! Event cost estimation.
//!
//! Combines the year's rates with the special-date adjustment:
//!
//! ```text
//! base_subtotal  = base_per_helper * helpers            (any positive duration)
//! extra_subtotal = extra_per_hour_per_helper * helpers * max(hours - 4, 0)
//! total          = round2((base_subtotal + extra_subtotal) * multiplier + flat_increase)
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{PricingConfig, is_valid_surge_multiplier};
use crate::error::{EngineError, EngineResult};
use crate::models::{EstimateResult, RuleKind, SpecialDateRule, round_currency};

use super::rate_table::rates_for_year;
use super::special_date::resolve_special_date;

/// Hours covered by the flat per-helper base charge.
pub const BASE_BLOCK_HOURS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Calculates the cost of an event.
///
/// # Arguments
///
/// * `config` - The pricing schedule
/// * `event_date` - The event date; `None` is rejected
/// * `duration_hours` - Booked hours, must be positive
/// * `num_helpers` - Helpers booked, must be positive
///
/// # Returns
///
/// An [`EstimateResult`], or an error if:
/// - Any input is missing or non-positive (`InvalidInput`)
/// - The date resolves to a surge rule whose multiplier is outside
///   [1.25, 3.0] (`InvalidSurgeMultiplier`)
///
/// # Example
///
/// ```
/// use event_pricing::calculation::calculate_estimate;
/// use event_pricing::config::PricingConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = PricingConfig::standard();
/// let date = NaiveDate::from_ymd_opt(2025, 6, 15);
///
/// let estimate = calculate_estimate(&config, date, Decimal::new(6, 0), 2).unwrap();
/// assert_eq!(estimate.base_subtotal, Decimal::new(550, 0));
/// assert_eq!(estimate.extra_subtotal, Decimal::new(180, 0));
/// assert_eq!(estimate.total_cost, Decimal::new(730, 0));
/// ```
pub fn calculate_estimate(
    config: &PricingConfig,
    event_date: Option<NaiveDate>,
    duration_hours: Decimal,
    num_helpers: u32,
) -> EngineResult<EstimateResult> {
    let event_date =
        event_date.ok_or_else(|| EngineError::invalid_input("event_date", "is required"))?;
    if duration_hours <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "duration_hours",
            format!("must be greater than zero, got {duration_hours}"),
        ));
    }
    if num_helpers == 0 {
        return Err(EngineError::invalid_input(
            "num_helpers",
            "must be greater than zero",
        ));
    }

    let year = event_date.year();
    let lookup = rates_for_year(config.rates(), year);
    if lookup.is_clamped() {
        debug!(
            requested_year = year,
            year_used = lookup.year_used,
            "Event year outside rate table, clamping"
        );
    }
    let rates = lookup.rates;
    let helpers = Decimal::from(num_helpers);

    // Any positive duration bills one full base block.
    let billed_base_block = Decimal::ONE;
    let extra_hours = (duration_hours - BASE_BLOCK_HOURS).max(Decimal::ZERO);

    let base_subtotal = rates
        .base_per_helper
        .checked_mul(helpers)
        .and_then(|base| base.checked_mul(billed_base_block))
        .ok_or_else(|| out_of_range(duration_hours, num_helpers))?;
    let extra_subtotal = rates
        .extra_per_hour_per_helper
        .checked_mul(helpers)
        .and_then(|per_hour| per_hour.checked_mul(extra_hours))
        .ok_or_else(|| out_of_range(duration_hours, num_helpers))?;
    let subtotal_before_adjustments = base_subtotal
        .checked_add(extra_subtotal)
        .ok_or_else(|| out_of_range(duration_hours, num_helpers))?;

    let resolution = resolve_special_date(config.special_dates(), event_date);
    if let Some(rule) = resolution.rule.as_ref().filter(|r| r.kind == RuleKind::Surge) {
        // A surge rule without a multiplier would price at 1.0x.
        let multiplier = rule.multiplier.unwrap_or(Decimal::ONE);
        if !is_valid_surge_multiplier(multiplier) {
            return Err(EngineError::InvalidSurgeMultiplier {
                date: event_date,
                multiplier,
            });
        }
    }

    let adjusted = match &resolution.rule {
        Some(rule) => rule
            .checked_apply(subtotal_before_adjustments)
            .ok_or_else(|| out_of_range(duration_hours, num_helpers))?,
        None => subtotal_before_adjustments,
    };
    let total_cost = round_currency(adjusted);

    let date_key = event_date.format("%Y-%m-%d").to_string();
    let breakdown = build_breakdown(
        num_helpers,
        extra_hours,
        rates.base_per_helper,
        rates.extra_per_hour_per_helper,
        base_subtotal,
        extra_subtotal,
        resolution.rule.as_ref(),
        total_cost,
    );
    let summary = build_summary(
        &date_key,
        num_helpers,
        duration_hours,
        resolution.rule.as_ref(),
        total_cost,
    );

    Ok(EstimateResult {
        year,
        date_key,
        num_helpers,
        duration_hours,
        extra_hours,
        base_per_helper: rates.base_per_helper,
        extra_per_hour_per_helper: rates.extra_per_hour_per_helper,
        base_subtotal,
        extra_subtotal,
        subtotal_before_adjustments,
        is_special_date: resolution.is_special,
        special_label: resolution.rule.as_ref().map(|r| r.label.clone()),
        rate_type: resolution.kind(),
        special_multiplier: resolution.rule.as_ref().and_then(|r| r.multiplier),
        special_flat_increase: resolution.rule.as_ref().and_then(|r| r.flat_increase),
        total_cost,
        breakdown,
        summary,
    })
}

fn out_of_range(duration_hours: Decimal, num_helpers: u32) -> EngineError {
    EngineError::invalid_input(
        "duration_hours",
        format!("{duration_hours} hours with {num_helpers} helpers is too large to price"),
    )
}

fn money(amount: Decimal) -> String {
    format!("${:.2}", round_currency(amount))
}

fn helpers_phrase(num_helpers: u32) -> String {
    if num_helpers == 1 {
        "1 helper".to_string()
    } else {
        format!("{num_helpers} helpers")
    }
}

#[allow(clippy::too_many_arguments)]
fn build_breakdown(
    num_helpers: u32,
    extra_hours: Decimal,
    base_per_helper: Decimal,
    extra_per_hour_per_helper: Decimal,
    base_subtotal: Decimal,
    extra_subtotal: Decimal,
    rule: Option<&SpecialDateRule>,
    total_cost: Decimal,
) -> BTreeMap<String, String> {
    let mut breakdown = BTreeMap::new();

    breakdown.insert(
        "baseBlock".to_string(),
        format!(
            "{} x {} (first {} hours) = {}",
            money(base_per_helper),
            helpers_phrase(num_helpers),
            BASE_BLOCK_HOURS,
            money(base_subtotal)
        ),
    );
    breakdown.insert(
        "extraHours".to_string(),
        format!(
            "{} x {} x {} extra hours = {}",
            money(extra_per_hour_per_helper),
            helpers_phrase(num_helpers),
            extra_hours.normalize(),
            money(extra_subtotal)
        ),
    );
    if let Some(rule) = rule {
        let mut parts = Vec::new();
        if let Some(multiplier) = rule.multiplier {
            parts.push(format!("x{}", multiplier.normalize()));
        }
        if let Some(flat) = rule.flat_increase {
            parts.push(format!("+{}", money(flat)));
        }
        let adjustment = if parts.is_empty() {
            "no adjustment".to_string()
        } else {
            parts.join(" ")
        };
        breakdown.insert(
            "specialDate".to_string(),
            format!("{} ({}): {}", rule.label, rule.kind, adjustment),
        );
    }
    breakdown.insert("total".to_string(), money(total_cost));

    breakdown
}

fn build_summary(
    date_key: &str,
    num_helpers: u32,
    duration_hours: Decimal,
    rule: Option<&SpecialDateRule>,
    total_cost: Decimal,
) -> String {
    let special = rule
        .map(|r| format!(" ({} pricing: {})", r.kind, r.label))
        .unwrap_or_default();
    format!(
        "{} for {} hours on {}{}: {}",
        helpers_phrase(num_helpers),
        duration_hours.normalize(),
        date_key,
        special,
        money(total_cost)
    )
}
