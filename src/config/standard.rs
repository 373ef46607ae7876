//! The compiled-in standard pricing schedule.
//!
//! `config/standard/` holds the same schedule as YAML; the loader tests keep
//! the two in step.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::SpecialDateRule;

use super::types::{
    BusinessMetadata, DepositPolicy, PricingConfig, RateEntry, RateTable, SpecialDateTables,
    TravelPolicy,
};

/// `(year, base per helper, extra per hour per helper)` in whole dollars.
const STANDARD_RATES: [(i32, i64, i64); 6] = [
    (2025, 275, 45),
    (2026, 300, 50),
    (2027, 325, 55),
    (2028, 400, 60),
    (2029, 475, 65),
    (2030, 550, 70),
];

/// Recurring `(month, day)` surge dates, enumerated for every rate year.
const STANDARD_SURGE_DAYS: [(u32, u32); 5] = [(1, 1), (2, 5), (5, 17), (8, 19), (12, 27)];

/// Label carried by every standard surge date.
pub const SURGE_LABEL: &str = "High-demand date";

/// Pre-computed 2025 holidays kept for older bookings.
const STANDARD_LEGACY_DATES: [(i32, u32, u32, &str); 5] = [
    (2025, 1, 1, "New Year's Day"),
    (2025, 11, 27, "Thanksgiving"),
    (2025, 12, 24, "Christmas Eve"),
    (2025, 12, 25, "Christmas Day"),
    (2025, 12, 31, "New Year's Eve"),
];

impl PricingConfig {
    /// The canonical single-business schedule.
    ///
    /// Rates for 2025 through 2030, holidays at 2.0x, surge dates at 1.5x,
    /// deposits between 15% and 30% targeting 22.5% on a $50..=$5000
    /// lattice, and a 15 mile free travel radius.
    ///
    /// # Example
    ///
    /// ```
    /// use event_pricing::config::PricingConfig;
    ///
    /// let config = PricingConfig::standard();
    /// assert!(config.validate().is_ok());
    /// assert_eq!(config.rates().entries().len(), 6);
    /// ```
    pub fn standard() -> Self {
        Self::new(
            BusinessMetadata {
                code: "standard".to_string(),
                name: "Event Helpers".to_string(),
                version: "2025-01-01".to_string(),
            },
            standard_rate_table(),
            standard_special_dates(),
            standard_deposit_policy(),
            standard_travel_policy(),
        )
    }
}

fn standard_rate_table() -> RateTable {
    let entries = STANDARD_RATES.iter().map(|&(year, base, extra)| {
        (
            year,
            RateEntry {
                base_per_helper: Decimal::new(base, 0),
                extra_per_hour_per_helper: Decimal::new(extra, 0),
            },
        )
    });
    // The constant table is non-empty and non-negative.
    match RateTable::new(entries) {
        Ok(table) => table,
        Err(err) => unreachable!("standard rate table is valid: {err}"),
    }
}

fn standard_special_dates() -> SpecialDateTables {
    let surge_multiplier = Decimal::new(15, 1);
    let surge = STANDARD_RATES.iter().flat_map(|&(year, _, _)| {
        STANDARD_SURGE_DAYS.iter().filter_map(move |&(month, day)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| (date, SpecialDateRule::surge(SURGE_LABEL, surge_multiplier)))
        })
    });

    let legacy = STANDARD_LEGACY_DATES
        .iter()
        .filter_map(|&(year, month, day, label)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| (date, SpecialDateRule::legacy(label, Some(Decimal::new(2, 0)), None)))
        });

    SpecialDateTables::new(Decimal::new(2, 0), surge, legacy)
}

fn standard_deposit_policy() -> DepositPolicy {
    DepositPolicy {
        min_percent: Decimal::new(15, 2),
        max_percent: Decimal::new(30, 2),
        target_percent: Decimal::new(225, 3),
        lattice_step_cents: 5_000,
        lattice_max_cents: 500_000,
    }
}

fn standard_travel_policy() -> TravelPolicy {
    TravelPolicy {
        service_radius_miles: 15.0,
        minimum_band_miles: 10.0,
        minimum_fee_per_helper: Decimal::new(40, 0),
        increment_miles: 10.0,
        increment_fee_per_helper: Decimal::new(10, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleKind;

    #[test]
    fn test_standard_config_validates() {
        assert!(PricingConfig::standard().validate().is_ok());
    }

    #[test]
    fn test_standard_surge_dates_cover_every_rate_year() {
        let config = PricingConfig::standard();
        let surge = config.special_dates().surge();
        assert_eq!(surge.len(), 30);
        for year in 2025..=2030 {
            let date = NaiveDate::from_ymd_opt(year, 8, 19).unwrap();
            let rule = surge.get(&date).unwrap();
            assert_eq!(rule.kind, RuleKind::Surge);
            assert_eq!(rule.multiplier, Some(Decimal::new(15, 1)));
        }
    }

    #[test]
    fn test_standard_legacy_rules_are_tagged_legacy() {
        let config = PricingConfig::standard();
        assert!(
            config
                .special_dates()
                .legacy()
                .values()
                .all(|rule| rule.kind == RuleKind::Legacy)
        );
    }

    #[test]
    fn test_standard_lattice_has_one_hundred_amounts() {
        let policy = standard_deposit_policy();
        let lattice: Vec<i64> = policy.lattice().collect();
        assert_eq!(lattice.len(), 100);
        assert_eq!(lattice.first(), Some(&5_000));
        assert_eq!(lattice.last(), Some(&500_000));
    }
}
