//! Rate table lookup.
//!
//! This module resolves the per-helper rates for an event year. The lookup
//! never fails: years outside the table clamp to its nearest end.

use serde::{Deserialize, Serialize};

use crate::config::{RateEntry, RateTable};

/// The result of a rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLookup {
    /// The year that was asked for.
    pub requested_year: i32,
    /// The table year whose rates were used.
    pub year_used: i32,
    /// The rates for `year_used`.
    pub rates: RateEntry,
}

impl RateLookup {
    /// True when the requested year was outside the table (or fell in a gap).
    pub fn is_clamped(&self) -> bool {
        self.requested_year != self.year_used
    }
}

/// Returns the rates for `year`.
///
/// Resolution order:
/// 1. The exact year, if present.
/// 2. The latest table year before `year` (covers years past the end and
///    gaps inside a loaded table).
/// 3. The earliest table year (years before the start).
///
/// Rates are never interpolated or extrapolated.
///
/// # Example
///
/// ```
/// use event_pricing::calculation::rates_for_year;
/// use event_pricing::config::PricingConfig;
/// use rust_decimal::Decimal;
///
/// let config = PricingConfig::standard();
///
/// let lookup = rates_for_year(config.rates(), 2026);
/// assert_eq!(lookup.rates.base_per_helper, Decimal::new(300, 0));
///
/// // Beyond the table: clamps to 2030.
/// let lookup = rates_for_year(config.rates(), 2045);
/// assert_eq!(lookup.year_used, 2030);
/// ```
pub fn rates_for_year(table: &RateTable, year: i32) -> RateLookup {
    let (year_used, rates) = table.at_or_before(year).unwrap_or_else(|| table.earliest());

    RateLookup {
        requested_year: year,
        year_used,
        rates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(base: &str, extra: &str) -> RateEntry {
        RateEntry {
            base_per_helper: dec(base),
            extra_per_hour_per_helper: dec(extra),
        }
    }

    #[test]
    fn test_canonical_rates_exact_match() {
        let config = PricingConfig::standard();
        let expected = [
            (2025, "275", "45"),
            (2026, "300", "50"),
            (2027, "325", "55"),
            (2028, "400", "60"),
            (2029, "475", "65"),
            (2030, "550", "70"),
        ];

        for (year, base, extra) in expected {
            let lookup = rates_for_year(config.rates(), year);
            assert_eq!(lookup.year_used, year);
            assert!(!lookup.is_clamped());
            assert_eq!(lookup.rates, entry(base, extra), "rates for {}", year);
        }
    }

    #[test]
    fn test_year_before_table_clamps_to_earliest() {
        let config = PricingConfig::standard();
        let lookup = rates_for_year(config.rates(), 2019);

        assert_eq!(lookup.year_used, 2025);
        assert!(lookup.is_clamped());
        assert_eq!(lookup.rates, entry("275", "45"));
    }

    #[test]
    fn test_year_after_table_clamps_to_latest() {
        let config = PricingConfig::standard();
        let lookup = rates_for_year(config.rates(), 2031);

        assert_eq!(lookup.year_used, 2030);
        assert_eq!(lookup.rates, entry("550", "70"));
    }

    #[test]
    fn test_extreme_years_never_fail() {
        let config = PricingConfig::standard();
        assert_eq!(rates_for_year(config.rates(), i32::MIN).year_used, 2025);
        assert_eq!(rates_for_year(config.rates(), i32::MAX).year_used, 2030);
    }

    #[test]
    fn test_gap_in_loaded_table_uses_previous_year() {
        let table = RateTable::new([
            (2025, entry("275", "45")),
            (2028, entry("400", "60")),
        ])
        .unwrap();

        let lookup = rates_for_year(&table, 2026);
        assert_eq!(lookup.year_used, 2025);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(RateTable::new(Vec::new()).is_err());
    }
}
