//! Configuration types for the pricing engine.
//!
//! This module contains the strongly-typed configuration structures. The
//! `*File` structs mirror the YAML files on disk; the remaining types are the
//! validated, immutable tables the calculators read.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{RuleKind, SpecialDateRule};

/// Lowest multiplier a surge rule may carry.
pub const SURGE_MULTIPLIER_MIN: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Highest multiplier a surge rule may carry.
pub const SURGE_MULTIPLIER_MAX: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// True when `multiplier` lies inside the inclusive surge band.
pub fn is_valid_surge_multiplier(multiplier: Decimal) -> bool {
    (SURGE_MULTIPLIER_MIN..=SURGE_MULTIPLIER_MAX).contains(&multiplier)
}

/// Metadata about the business whose prices are configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessMetadata {
    /// Short identifier for the schedule (e.g., "standard").
    pub code: String,
    /// Business display name.
    pub name: String,
    /// Version or effective date of the schedule.
    pub version: String,
}

/// Per-helper rates for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    /// Charge per helper for the base block.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_per_helper: Decimal,
    /// Charge per helper for each hour beyond the base block.
    #[serde(with = "rust_decimal::serde::float")]
    pub extra_per_hour_per_helper: Decimal,
}

/// Year-keyed rate table.
///
/// Always holds at least one year, so a lookup can always clamp to
/// something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    entries: BTreeMap<i32, RateEntry>,
    earliest: (i32, RateEntry),
}

impl RateTable {
    /// Creates a rate table from `(year, entry)` pairs.
    ///
    /// Returns `InvalidConfig` when no years are given or a rate is negative.
    pub fn new(entries: impl IntoIterator<Item = (i32, RateEntry)>) -> EngineResult<Self> {
        let entries: BTreeMap<i32, RateEntry> = entries.into_iter().collect();
        let Some(earliest) = entries.first_key_value().map(|(y, e)| (*y, *e)) else {
            return Err(EngineError::InvalidConfig {
                message: "rate table must define at least one year".to_string(),
            });
        };
        if let Some((year, _)) = entries.iter().find(|(_, e)| {
            e.base_per_helper.is_sign_negative() || e.extra_per_hour_per_helper.is_sign_negative()
        }) {
            return Err(EngineError::InvalidConfig {
                message: format!("rates for {year} must not be negative"),
            });
        }
        Ok(Self { entries, earliest })
    }

    /// All entries, ordered by year.
    pub fn entries(&self) -> &BTreeMap<i32, RateEntry> {
        &self.entries
    }

    /// The earliest configured year and its rates.
    pub fn earliest(&self) -> (i32, RateEntry) {
        self.earliest
    }

    /// The latest configured year at or before `year`, if there is one.
    pub fn at_or_before(&self, year: i32) -> Option<(i32, RateEntry)> {
        self.entries
            .range(..=year)
            .next_back()
            .map(|(y, e)| (*y, *e))
    }
}

/// The special-date tables.
///
/// Holidays are computed per year from `holiday_multiplier`; surge and legacy
/// dates are explicit absolute dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialDateTables {
    holiday_multiplier: Decimal,
    surge: BTreeMap<NaiveDate, SpecialDateRule>,
    legacy: BTreeMap<NaiveDate, SpecialDateRule>,
}

impl SpecialDateTables {
    /// Builds the tables without validating them.
    ///
    /// Each rule's `kind` is forced to match the table it is placed in.
    /// Use [`SpecialDateTables::validate`] (or load through
    /// [`crate::config::ConfigLoader`]) to reject bad multipliers up front.
    pub fn new(
        holiday_multiplier: Decimal,
        surge: impl IntoIterator<Item = (NaiveDate, SpecialDateRule)>,
        legacy: impl IntoIterator<Item = (NaiveDate, SpecialDateRule)>,
    ) -> Self {
        let retag = |kind: RuleKind| {
            move |(date, mut rule): (NaiveDate, SpecialDateRule)| {
                rule.kind = kind;
                (date, rule)
            }
        };
        Self {
            holiday_multiplier,
            surge: surge.into_iter().map(retag(RuleKind::Surge)).collect(),
            legacy: legacy.into_iter().map(retag(RuleKind::Legacy)).collect(),
        }
    }

    /// Multiplier applied on every computed holiday.
    pub fn holiday_multiplier(&self) -> Decimal {
        self.holiday_multiplier
    }

    /// The surge table.
    pub fn surge(&self) -> &BTreeMap<NaiveDate, SpecialDateRule> {
        &self.surge
    }

    /// The legacy table.
    pub fn legacy(&self) -> &BTreeMap<NaiveDate, SpecialDateRule> {
        &self.legacy
    }

    /// Checks every rule once.
    ///
    /// Surge multipliers must lie in [1.25, 3.0]; every other multiplier must
    /// be positive and flat increases must not be negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.holiday_multiplier <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "holiday multiplier must be positive, got {}",
                    self.holiday_multiplier
                ),
            });
        }

        for (date, rule) in &self.surge {
            match rule.multiplier {
                Some(m) if is_valid_surge_multiplier(m) => {}
                Some(m) => {
                    return Err(EngineError::InvalidSurgeMultiplier {
                        date: *date,
                        multiplier: m,
                    });
                }
                None => {
                    return Err(EngineError::InvalidConfig {
                        message: format!("surge date {date} has no multiplier"),
                    });
                }
            }
        }

        for (date, rule) in self.surge.iter().chain(&self.legacy) {
            if rule.multiplier.is_some_and(|m| m <= Decimal::ZERO) {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} rule on {date} has a non-positive multiplier", rule.kind),
                });
            }
            if rule.flat_increase.is_some_and(|f| f.is_sign_negative()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} rule on {date} has a negative flat increase", rule.kind),
                });
            }
        }

        Ok(())
    }
}

/// Deposit band and lattice.
///
/// Percentages are fractions (0.15 means 15%). The target is configured on
/// its own and is not derived from the band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPolicy {
    /// Lower bound of the band.
    pub min_percent: Decimal,
    /// Upper bound of the band.
    pub max_percent: Decimal,
    /// Preferred fraction of the estimate.
    pub target_percent: Decimal,
    /// Lattice spacing and floor, in cents.
    pub lattice_step_cents: i64,
    /// Lattice ceiling, in cents (inclusive).
    pub lattice_max_cents: i64,
}

impl DepositPolicy {
    /// Every professional amount from one step up to the ceiling, ascending.
    pub fn lattice(&self) -> impl Iterator<Item = i64> + '_ {
        let step = self.lattice_step_cents.max(1);
        (1..=self.lattice_max_cents / step).map(move |n| n * step)
    }

    /// Checks the band and lattice shape.
    pub fn validate(&self) -> EngineResult<()> {
        if self.lattice_step_cents <= 0 || self.lattice_max_cents < self.lattice_step_cents {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "deposit lattice needs a positive step no larger than its ceiling (step {}, ceiling {})",
                    self.lattice_step_cents, self.lattice_max_cents
                ),
            });
        }
        if self.min_percent.is_sign_negative() || self.min_percent > self.max_percent {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "deposit band is inverted or negative ({} to {})",
                    self.min_percent, self.max_percent
                ),
            });
        }
        if self.target_percent.is_sign_negative() {
            return Err(EngineError::InvalidConfig {
                message: "deposit target must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Travel surcharge tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPolicy {
    /// Distance served without a fee.
    pub service_radius_miles: f64,
    /// Miles beyond the radius covered by the minimum fee.
    pub minimum_band_miles: f64,
    /// Fee per helper for the minimum band.
    pub minimum_fee_per_helper: Decimal,
    /// Size of each additional increment.
    pub increment_miles: f64,
    /// Fee per helper for each started increment.
    pub increment_fee_per_helper: Decimal,
}

impl TravelPolicy {
    /// Checks that the distances are usable.
    pub fn validate(&self) -> EngineResult<()> {
        let distances = [
            self.service_radius_miles,
            self.minimum_band_miles,
            self.increment_miles,
        ];
        if distances.iter().any(|d| !d.is_finite() || *d < 0.0) || self.increment_miles == 0.0 {
            return Err(EngineError::InvalidConfig {
                message: "travel distances must be finite, non-negative, with a non-zero increment"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// The complete pricing configuration.
///
/// Immutable once built; shared read-only by every calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    metadata: BusinessMetadata,
    rates: RateTable,
    special_dates: SpecialDateTables,
    deposit: DepositPolicy,
    travel: TravelPolicy,
}

impl PricingConfig {
    /// Creates a PricingConfig from its component parts.
    pub fn new(
        metadata: BusinessMetadata,
        rates: RateTable,
        special_dates: SpecialDateTables,
        deposit: DepositPolicy,
        travel: TravelPolicy,
    ) -> Self {
        Self {
            metadata,
            rates,
            special_dates,
            deposit,
            travel,
        }
    }

    /// Runs every table check once, failing on the first problem.
    pub fn validate(&self) -> EngineResult<()> {
        self.special_dates.validate()?;
        self.deposit.validate()?;
        self.travel.validate()
    }

    /// Returns the business metadata.
    pub fn business(&self) -> &BusinessMetadata {
        &self.metadata
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Returns the special-date tables.
    pub fn special_dates(&self) -> &SpecialDateTables {
        &self.special_dates
    }

    /// Returns the deposit policy.
    pub fn deposit(&self) -> &DepositPolicy {
        &self.deposit
    }

    /// Returns the travel policy.
    pub fn travel(&self) -> &TravelPolicy {
        &self.travel
    }
}

/// `rates.yaml` structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesFile {
    /// One row per year.
    pub rates: Vec<RateFileEntry>,
}

/// A row in `rates.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RateFileEntry {
    /// Calendar year.
    pub year: i32,
    /// Base-block charge per helper.
    pub base_per_helper: Decimal,
    /// Hourly charge per helper beyond the base block.
    pub extra_per_hour_per_helper: Decimal,
}

/// `special_dates.yaml` structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialDatesFile {
    /// Multiplier for computed holidays.
    pub holiday_multiplier: Decimal,
    /// Enumerated surge dates.
    #[serde(default)]
    pub surge: Vec<DatedRuleEntry>,
    /// One-off legacy dates.
    #[serde(default)]
    pub legacy: Vec<DatedRuleEntry>,
}

/// A dated rule row in `special_dates.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatedRuleEntry {
    /// The absolute date.
    pub date: NaiveDate,
    /// Human-readable label.
    pub label: String,
    /// Optional multiplier.
    #[serde(default)]
    pub multiplier: Option<Decimal>,
    /// Optional flat increase.
    #[serde(default)]
    pub flat_increase: Option<Decimal>,
}

impl DatedRuleEntry {
    /// Converts the row into a keyed rule of the given kind.
    pub fn into_rule(self, kind: RuleKind) -> (NaiveDate, SpecialDateRule) {
        (
            self.date,
            SpecialDateRule {
                kind,
                label: self.label,
                multiplier: self.multiplier,
                flat_increase: self.flat_increase,
            },
        )
    }
}
