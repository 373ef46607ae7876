//! Special-date rule models.
//!
//! A special date is a calendar date that carries a price adjustment. Rules
//! come in three kinds, resolved by a fixed precedence: holiday, then surge,
//! then legacy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a special-date rule.
///
/// Variants are declared in precedence order, so the derived [`Ord`] ranks a
/// holiday ahead of a surge date and a surge date ahead of a legacy date.
///
/// # Example
///
/// ```
/// use event_pricing::models::RuleKind;
///
/// assert!(RuleKind::Holiday < RuleKind::Surge);
/// assert!(RuleKind::Surge < RuleKind::Legacy);
/// assert_eq!(RuleKind::Surge.to_string(), "surge");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// A computed public holiday (New Year's Day, Thanksgiving, Christmas...).
    Holiday,
    /// An enumerated high-demand date.
    Surge,
    /// A one-off date kept from older pre-computed holiday data.
    Legacy,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Holiday => write!(f, "holiday"),
            RuleKind::Surge => write!(f, "surge"),
            RuleKind::Legacy => write!(f, "legacy"),
        }
    }
}

/// A price adjustment attached to a single calendar date.
///
/// A rule may carry a multiplier, a flat increase, both, or neither. When both
/// are present the multiplier is applied first and the flat increase added to
/// the multiplied subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDateRule {
    /// Which table the rule belongs to.
    pub kind: RuleKind,
    /// Human-readable label, e.g. "Christmas Day".
    pub label: String,
    /// Ratio applied to the subtotal.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub multiplier: Option<Decimal>,
    /// Currency amount added after the multiplier.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub flat_increase: Option<Decimal>,
}

impl SpecialDateRule {
    /// Creates a holiday rule with the given multiplier.
    pub fn holiday(label: impl Into<String>, multiplier: Decimal) -> Self {
        Self {
            kind: RuleKind::Holiday,
            label: label.into(),
            multiplier: Some(multiplier),
            flat_increase: None,
        }
    }

    /// Creates a surge rule with the given multiplier.
    pub fn surge(label: impl Into<String>, multiplier: Decimal) -> Self {
        Self {
            kind: RuleKind::Surge,
            label: label.into(),
            multiplier: Some(multiplier),
            flat_increase: None,
        }
    }

    /// Creates a legacy rule.
    pub fn legacy(
        label: impl Into<String>,
        multiplier: Option<Decimal>,
        flat_increase: Option<Decimal>,
    ) -> Self {
        Self {
            kind: RuleKind::Legacy,
            label: label.into(),
            multiplier,
            flat_increase,
        }
    }

    /// Applies the adjustment to a subtotal: the multiplier first, then
    /// the flat increase. Returns `None` on overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use event_pricing::models::SpecialDateRule;
    /// use rust_decimal::Decimal;
    ///
    /// let rule = SpecialDateRule::legacy("Launch day", Some(Decimal::new(15, 1)), Some(Decimal::new(25, 0)));
    /// assert_eq!(rule.checked_apply(Decimal::new(100, 0)), Some(Decimal::new(175, 0)));
    /// ```
    pub fn checked_apply(&self, subtotal: Decimal) -> Option<Decimal> {
        let multiplied = match self.multiplier {
            Some(multiplier) => subtotal.checked_mul(multiplier)?,
            None => subtotal,
        };
        match self.flat_increase {
            Some(flat) => multiplied.checked_add(flat),
            None => Some(multiplied),
        }
    }
}

/// The outcome of resolving a date against the special-date tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDateResolution {
    /// True when some rule matched the date.
    pub is_special: bool,
    /// The winning rule, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<SpecialDateRule>,
}

impl SpecialDateResolution {
    /// A resolution for an ordinary date.
    pub fn ordinary() -> Self {
        Self {
            is_special: false,
            rule: None,
        }
    }

    /// A resolution carrying the matched rule.
    pub fn matched(rule: SpecialDateRule) -> Self {
        Self {
            is_special: true,
            rule: Some(rule),
        }
    }

    /// The kind of the matched rule.
    pub fn kind(&self) -> Option<RuleKind> {
        self.rule.as_ref().map(|r| r.kind)
    }
}

/// One row of the special-date calendar used for operational visibility.
///
/// `resolves_as` is the kind that wins for the date after precedence, which
/// differs from `rule.kind` when an entry is shadowed (a surge date that is
/// also a holiday, for instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDateEntry {
    /// The calendar date.
    pub date: NaiveDate,
    /// The table entry itself.
    pub rule: SpecialDateRule,
    /// The kind that actually resolves for this date.
    pub resolves_as: RuleKind,
}

impl SpecialDateEntry {
    /// True when a higher-precedence rule hides this entry.
    pub fn is_shadowed(&self) -> bool {
        self.resolves_as != self.rule.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rule_kind_precedence_order() {
        let mut kinds = vec![RuleKind::Legacy, RuleKind::Holiday, RuleKind::Surge];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![RuleKind::Holiday, RuleKind::Surge, RuleKind::Legacy]
        );
    }

    #[test]
    fn test_rule_kind_serialization() {
        let json = serde_json::to_string(&RuleKind::Holiday).unwrap();
        assert_eq!(json, "\"holiday\"");

        let deserialized: RuleKind = serde_json::from_str("\"legacy\"").unwrap();
        assert_eq!(deserialized, RuleKind::Legacy);
    }

    #[test]
    fn test_apply_multiplier_only() {
        let rule = SpecialDateRule::holiday("Christmas Day", dec("2.0"));
        assert_eq!(rule.checked_apply(dec("550")), Some(dec("1100")));
    }

    #[test]
    fn test_apply_flat_increase_only() {
        let rule = SpecialDateRule::legacy("Old promo", None, Some(dec("75")));
        assert_eq!(rule.checked_apply(dec("550")), Some(dec("625")));
    }

    #[test]
    fn test_apply_flat_increase_after_multiplier() {
        let rule = SpecialDateRule::legacy("Old promo", Some(dec("1.5")), Some(dec("10")));
        // (200 * 1.5) + 10, not (200 + 10) * 1.5
        assert_eq!(rule.checked_apply(dec("200")), Some(dec("310")));
    }

    #[test]
    fn test_apply_neither_is_identity() {
        let rule = SpecialDateRule::legacy("Marker", None, None);
        assert_eq!(rule.checked_apply(dec("123.45")), Some(dec("123.45")));
    }

    #[test]
    fn test_apply_overflow_is_none() {
        let doubled = SpecialDateRule::holiday("Christmas Day", dec("2.0"));
        assert_eq!(doubled.checked_apply(Decimal::MAX), None);

        let flat = SpecialDateRule::legacy("Old promo", None, Some(dec("75")));
        assert_eq!(flat.checked_apply(Decimal::MAX), None);
    }

    #[test]
    fn test_rule_serializes_multiplier_as_number() {
        let rule = SpecialDateRule::surge("High-demand date", dec("1.5"));
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["kind"], "surge");
        assert_eq!(json["multiplier"].as_f64(), Some(1.5));
        assert!(json.get("flatIncrease").is_none());
    }

    #[test]
    fn test_resolution_kind() {
        assert_eq!(SpecialDateResolution::ordinary().kind(), None);
        let resolution =
            SpecialDateResolution::matched(SpecialDateRule::holiday("New Year's Day", dec("2")));
        assert!(resolution.is_special);
        assert_eq!(resolution.kind(), Some(RuleKind::Holiday));
    }

    #[test]
    fn test_entry_shadowed_when_kinds_differ() {
        let entry = SpecialDateEntry {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            rule: SpecialDateRule::surge("High-demand date", dec("1.5")),
            resolves_as: RuleKind::Holiday,
        };
        assert!(entry.is_shadowed());
    }
}
