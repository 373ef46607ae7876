//! Special-date calendar for operational visibility.
//!
//! Lists every holiday, surge and legacy entry in a window of years exactly
//! as the tables define them, each annotated with the kind that actually
//! resolves for its date.

use chrono::Datelike;

use crate::config::SpecialDateTables;
use crate::models::SpecialDateEntry;

use super::holidays::holidays_for_year;
use super::special_date::resolve_special_date;

/// Upper bound on the number of years a single listing may span.
pub const MAX_CALENDAR_YEARS: u32 = 25;

/// Lists special dates for `years` calendar years starting at `from_year`.
///
/// Entries are ordered by date, then by precedence, so a date present in
/// several tables appears once per table with the winning entry first.
/// `years` is capped at [`MAX_CALENDAR_YEARS`].
///
/// # Example
///
/// ```
/// use event_pricing::calculation::special_date_calendar;
/// use event_pricing::config::PricingConfig;
/// use event_pricing::models::RuleKind;
///
/// let config = PricingConfig::standard();
/// let entries = special_date_calendar(config.special_dates(), 2026, 1);
///
/// // 5 computed holidays + 5 surge dates for 2026.
/// assert_eq!(entries.len(), 10);
/// assert_eq!(entries[0].rule.kind, RuleKind::Holiday);
/// assert!(entries[1].is_shadowed()); // Jan 1 surge, hidden by the holiday
/// ```
pub fn special_date_calendar(
    tables: &SpecialDateTables,
    from_year: i32,
    years: u32,
) -> Vec<SpecialDateEntry> {
    let years = years.min(MAX_CALENDAR_YEARS);
    if years == 0 {
        return Vec::new();
    }
    let last_year = from_year.saturating_add(years as i32 - 1);
    let in_window = |year: i32| (from_year..=last_year).contains(&year);

    let holidays = (from_year..=last_year)
        .flat_map(|year| holidays_for_year(year, tables.holiday_multiplier()));
    let tabled = tables
        .surge()
        .iter()
        .chain(tables.legacy())
        .filter(|(date, _)| in_window(date.year()))
        .map(|(date, rule)| (*date, rule.clone()));

    let mut entries: Vec<SpecialDateEntry> = holidays
        .chain(tabled)
        .filter_map(|(date, rule)| {
            resolve_special_date(tables, date)
                .kind()
                .map(|resolves_as| SpecialDateEntry {
                    date,
                    rule,
                    resolves_as,
                })
        })
        .collect();

    entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.rule.kind.cmp(&b.rule.kind)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use crate::models::{RuleKind, SpecialDateRule};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_calendar_for_2025_includes_legacy_entries() {
        let config = PricingConfig::standard();
        let entries = special_date_calendar(config.special_dates(), 2025, 1);

        // 5 holidays + 5 surge + 5 legacy
        assert_eq!(entries.len(), 15);
        let legacy: Vec<&SpecialDateEntry> = entries
            .iter()
            .filter(|e| e.rule.kind == RuleKind::Legacy)
            .collect();
        assert_eq!(legacy.len(), 5);
        assert!(legacy.iter().all(|e| e.resolves_as == RuleKind::Holiday));
    }

    #[test]
    fn test_calendar_is_sorted_by_date_then_precedence() {
        let config = PricingConfig::standard();
        let entries = special_date_calendar(config.special_dates(), 2025, 3);

        assert!(entries.windows(2).all(|w| {
            (w[0].date, w[0].rule.kind) <= (w[1].date, w[1].rule.kind)
        }));
    }

    #[test]
    fn test_surge_entries_that_win_are_not_shadowed() {
        let config = PricingConfig::standard();
        let entries = special_date_calendar(config.special_dates(), 2027, 1);

        let aug_19 = entries
            .iter()
            .find(|e| e.date == date("2027-08-19"))
            .unwrap();
        assert_eq!(aug_19.resolves_as, RuleKind::Surge);
        assert!(!aug_19.is_shadowed());
    }

    #[test]
    fn test_years_beyond_surge_table_list_only_holidays() {
        let config = PricingConfig::standard();
        let entries = special_date_calendar(config.special_dates(), 2040, 2);

        assert_eq!(entries.len(), 10);
        assert!(entries.iter().all(|e| e.rule.kind == RuleKind::Holiday));
    }

    #[test]
    fn test_zero_years_is_empty_and_window_is_capped() {
        let config = PricingConfig::standard();
        assert!(special_date_calendar(config.special_dates(), 2025, 0).is_empty());

        let capped = special_date_calendar(config.special_dates(), 2100, 1_000);
        assert_eq!(capped.len(), MAX_CALENDAR_YEARS as usize * 5);
    }

    #[test]
    fn test_calendar_reflects_custom_tables() {
        let tables = SpecialDateTables::new(
            Decimal::new(3, 0),
            vec![(
                date("2026-03-14"),
                SpecialDateRule::surge("Pi day", Decimal::new(2, 0)),
            )],
            Vec::new(),
        );
        let entries = special_date_calendar(&tables, 2026, 1);

        let pi_day = entries.iter().find(|e| e.date == date("2026-03-14")).unwrap();
        assert_eq!(pi_day.rule.label, "Pi day");
        assert!(
            entries
                .iter()
                .filter(|e| e.rule.kind == RuleKind::Holiday)
                .all(|e| e.rule.multiplier == Some(Decimal::new(3, 0)))
        );
    }
}
