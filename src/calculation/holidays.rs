//! Computed holidays.
//!
//! Holidays are derived for any year rather than listed:
//! New Year's Day (Jan 1), Thanksgiving (4th Thursday of November),
//! Christmas Eve (Dec 24), Christmas Day (Dec 25) and New Year's Eve (Dec 31).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::SpecialDateRule;

/// Day of November on which Thanksgiving falls in `year`.
///
/// With `w` the weekday of November 1st counted from Sunday (Sunday = 0,
/// Thursday = 4), the first Thursday is `1 + (4 - w + 7) % 7` and the fourth
/// is three weeks later:
///
/// ```text
/// thanksgiving_day = 1 + ((4 - w + 7) % 7) + 21
/// ```
///
/// Returns `None` only for years chrono cannot represent.
///
/// # Example
///
/// ```
/// use event_pricing::calculation::thanksgiving_day;
///
/// assert_eq!(thanksgiving_day(2025), Some(27));
/// assert_eq!(thanksgiving_day(2026), Some(26));
/// ```
pub fn thanksgiving_day(year: i32) -> Option<u32> {
    let november_first = NaiveDate::from_ymd_opt(year, 11, 1)?;
    let weekday = november_first.weekday().num_days_from_sunday();
    Some(1 + ((4 + 7 - weekday) % 7) + 21)
}

/// All computed holidays for `year`, in calendar order.
///
/// # Example
///
/// ```
/// use event_pricing::calculation::holidays_for_year;
/// use rust_decimal::Decimal;
///
/// let holidays = holidays_for_year(2025, Decimal::new(2, 0));
/// let labels: Vec<&str> = holidays.iter().map(|(_, r)| r.label.as_str()).collect();
/// assert_eq!(
///     labels,
///     ["New Year's Day", "Thanksgiving", "Christmas Eve", "Christmas Day", "New Year's Eve"]
/// );
/// ```
pub fn holidays_for_year(year: i32, multiplier: Decimal) -> Vec<(NaiveDate, SpecialDateRule)> {
    let fixed = |month: u32, day: u32, label: &'static str| {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, label))
    };

    [
        fixed(1, 1, "New Year's Day"),
        thanksgiving_day(year).and_then(|day| fixed(11, day, "Thanksgiving")),
        fixed(12, 24, "Christmas Eve"),
        fixed(12, 25, "Christmas Day"),
        fixed(12, 31, "New Year's Eve"),
    ]
    .into_iter()
    .flatten()
    .map(|(date, label)| (date, SpecialDateRule::holiday(label, multiplier)))
    .collect()
}

/// The holiday rule for `date`, if it is a computed holiday.
pub fn holiday_on(date: NaiveDate, multiplier: Decimal) -> Option<SpecialDateRule> {
    let label = match (date.month(), date.day()) {
        (1, 1) => "New Year's Day",
        (12, 24) => "Christmas Eve",
        (12, 25) => "Christmas Day",
        (12, 31) => "New Year's Eve",
        (11, day) if thanksgiving_day(date.year()) == Some(day) => "Thanksgiving",
        _ => return None,
    };
    Some(SpecialDateRule::holiday(label, multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleKind;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_thanksgiving_known_years() {
        // Nov 1 weekday varies across these years, exercising every offset.
        let expected = [
            (2023, 23),
            (2024, 28),
            (2025, 27),
            (2026, 26),
            (2027, 25),
            (2028, 23),
            (2029, 22),
            (2030, 28),
        ];
        for (year, day) in expected {
            assert_eq!(thanksgiving_day(year), Some(day), "Thanksgiving {}", year);
        }
    }

    #[test]
    fn test_thanksgiving_is_fourth_thursday() {
        for year in 1990..2100 {
            let day = thanksgiving_day(year).unwrap();
            let thanksgiving = NaiveDate::from_ymd_opt(year, 11, day).unwrap();
            assert_eq!(thanksgiving.weekday(), chrono::Weekday::Thu);
            assert!((22..=28).contains(&day));
        }
    }

    #[test]
    fn test_holidays_for_year_are_all_holiday_kind() {
        let holidays = holidays_for_year(2027, Decimal::new(2, 0));
        assert_eq!(holidays.len(), 5);
        assert!(holidays.iter().all(|(_, r)| r.kind == RuleKind::Holiday));
        assert!(
            holidays
                .iter()
                .all(|(_, r)| r.multiplier == Some(Decimal::new(2, 0)))
        );
        assert!(holidays.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_holiday_on_christmas() {
        let rule = holiday_on(date("2025-12-25"), Decimal::new(2, 0)).unwrap();
        assert_eq!(rule.label, "Christmas Day");
    }

    #[test]
    fn test_holiday_on_thanksgiving_only_on_fourth_thursday() {
        assert_eq!(
            holiday_on(date("2026-11-26"), Decimal::new(2, 0)).map(|r| r.label),
            Some("Thanksgiving".to_string())
        );
        // Third Thursday of November 2026.
        assert!(holiday_on(date("2026-11-19"), Decimal::new(2, 0)).is_none());
    }

    #[test]
    fn test_holiday_on_ordinary_date() {
        assert!(holiday_on(date("2025-06-15"), Decimal::new(2, 0)).is_none());
    }

    #[test]
    fn test_holiday_on_agrees_with_holidays_for_year() {
        for year in 2020..2035 {
            for (day, rule) in holidays_for_year(year, Decimal::ONE) {
                assert_eq!(holiday_on(day, Decimal::ONE), Some(rule));
            }
        }
    }
}
