//! Special-date resolution.
//!
//! A date is checked against the computed holidays, the surge table and the
//! legacy table. At most one rule applies; the winner is picked by
//! [`RuleKind`] precedence (holiday, then surge, then legacy), never by
//! merging multipliers across kinds.

use chrono::NaiveDate;

use crate::config::SpecialDateTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{SpecialDateResolution, SpecialDateRule};

use super::holidays::holiday_on;

/// Every rule that matches `date`, in no particular order.
fn matching_rules(tables: &SpecialDateTables, date: NaiveDate) -> Vec<SpecialDateRule> {
    [
        holiday_on(date, tables.holiday_multiplier()),
        tables.surge().get(&date).cloned(),
        tables.legacy().get(&date).cloned(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Resolves the special-date rule for `date`.
///
/// # Example
///
/// ```
/// use event_pricing::calculation::resolve_special_date;
/// use event_pricing::config::PricingConfig;
/// use event_pricing::models::RuleKind;
/// use chrono::NaiveDate;
///
/// let config = PricingConfig::standard();
///
/// // Jan 1 is in both the holiday and surge tables; the holiday wins.
/// let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let resolution = resolve_special_date(config.special_dates(), new_year);
/// assert_eq!(resolution.kind(), Some(RuleKind::Holiday));
///
/// let ordinary = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
/// assert!(!resolve_special_date(config.special_dates(), ordinary).is_special);
/// ```
pub fn resolve_special_date(tables: &SpecialDateTables, date: NaiveDate) -> SpecialDateResolution {
    matching_rules(tables, date)
        .into_iter()
        .min_by_key(|rule| rule.kind)
        .map_or_else(SpecialDateResolution::ordinary, SpecialDateResolution::matched)
}

/// Resolves a `YYYY-MM-DD` date key.
///
/// Returns `InvalidInput` when the key is not a valid calendar date.
pub fn resolve_date_key(
    tables: &SpecialDateTables,
    date_key: &str,
) -> EngineResult<SpecialDateResolution> {
    let date = NaiveDate::parse_from_str(date_key, "%Y-%m-%d").map_err(|e| {
        EngineError::invalid_input(
            "date_key",
            format!("'{date_key}' is not a YYYY-MM-DD date: {e}"),
        )
    })?;
    Ok(resolve_special_date(tables, date))
}
