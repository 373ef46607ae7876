//! Request types for the pricing API.
//!
//! Bodies use camelCase keys. Currency and hour values accept plain JSON
//! numbers and are read into [`Decimal`] without passing through `f64`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::dollars_to_cents;

/// Largest helper count the API will price.
pub const MAX_HELPERS: u32 = 1_000;

/// Longest one-way distance, in miles, the API will quote travel for.
pub const MAX_DISTANCE_MILES: f64 = 5_000.0;

/// Request body for `POST /estimate`.
///
/// # Example
///
/// ```
/// use event_pricing::api::EstimateRequest;
///
/// let request: EstimateRequest = serde_json::from_str(
///     r#"{"eventDate": "2025-06-15", "durationHours": 6, "numHelpers": 2}"#,
/// ).unwrap();
/// assert_eq!(request.helpers().unwrap(), 2);
/// assert!(request.distance_miles.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    /// Event date as `YYYY-MM-DD`. Missing dates are rejected by the calculator.
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    /// Booked duration in hours.
    pub duration_hours: Decimal,
    /// Number of helpers.
    pub num_helpers: i64,
    /// Optional one-way driving distance, to quote the travel fee alongside.
    #[serde(default)]
    pub distance_miles: Option<f64>,
}

impl EstimateRequest {
    /// The helper count as the calculator's unsigned type.
    pub fn helpers(&self) -> EngineResult<u32> {
        helper_count(self.num_helpers)
    }

    /// The travel distance, if one was given and it is usable.
    pub fn distance(&self) -> EngineResult<Option<f64>> {
        self.distance_miles.map(checked_distance).transpose()
    }
}

/// Request body for `POST /deposit`.
///
/// When an amount is sent both in cents and in dollars, the cents value is
/// used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// The estimate in dollars.
    #[serde(default)]
    pub estimate_dollars: Option<Decimal>,
    /// The estimate in cents.
    #[serde(default)]
    pub estimate_cents: Option<i64>,
    /// A manually chosen deposit in dollars.
    #[serde(default)]
    pub manual_deposit_dollars: Option<Decimal>,
    /// A manually chosen deposit in cents.
    #[serde(default)]
    pub manual_deposit_cents: Option<i64>,
}

impl DepositRequest {
    /// The estimate in whole cents.
    ///
    /// # Example
    ///
    /// ```
    /// use event_pricing::api::DepositRequest;
    /// use rust_decimal::Decimal;
    ///
    /// let request = DepositRequest {
    ///     estimate_dollars: Some(Decimal::new(73_000, 2)),
    ///     ..Default::default()
    /// };
    /// assert_eq!(request.estimate_in_cents().unwrap(), 73_000);
    /// ```
    pub fn estimate_in_cents(&self) -> EngineResult<i64> {
        match (self.estimate_cents, self.estimate_dollars) {
            (Some(cents), _) => Ok(cents),
            (None, Some(dollars)) => Ok(dollars_to_cents(dollars)),
            (None, None) => Err(EngineError::invalid_input(
                "estimate",
                "one of estimateCents or estimateDollars is required",
            )),
        }
    }

    /// The manual override in whole cents, if any.
    pub fn manual_override_cents(&self) -> Option<i64> {
        self.manual_deposit_cents
            .or_else(|| self.manual_deposit_dollars.map(dollars_to_cents))
    }
}

/// Request body for `POST /travel-fee`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelFeeRequest {
    /// One-way driving distance in miles.
    pub distance_miles: f64,
    /// Number of helpers.
    pub num_helpers: i64,
}

impl TravelFeeRequest {
    /// Validated `(distance, helpers)`.
    pub fn inputs(&self) -> EngineResult<(f64, u32)> {
        Ok((
            checked_distance(self.distance_miles)?,
            helper_count(self.num_helpers)?,
        ))
    }
}

/// Query string for `GET /special-dates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDatesQuery {
    /// How many years to list; defaults to 3.
    #[serde(default)]
    pub years: Option<u32>,
    /// First year to list; defaults to the current year.
    #[serde(default)]
    pub from_year: Option<i32>,
}

fn helper_count(num_helpers: i64) -> EngineResult<u32> {
    match u32::try_from(num_helpers) {
        Ok(count) if (1..=MAX_HELPERS).contains(&count) => Ok(count),
        _ => Err(EngineError::invalid_input(
            "num_helpers",
            format!("must be between 1 and {MAX_HELPERS}, got {num_helpers}"),
        )),
    }
}

fn checked_distance(distance_miles: f64) -> EngineResult<f64> {
    if (0.0..=MAX_DISTANCE_MILES).contains(&distance_miles) {
        Ok(distance_miles)
    } else {
        Err(EngineError::invalid_input(
            "distance_miles",
            format!("must be between 0 and {MAX_DISTANCE_MILES} miles, got {distance_miles}"),
        ))
    }
}
