//! Response types for the pricing API.
//!
//! This module defines the success bodies that wrap calculator results and
//! the error response structures used by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{BusinessMetadata, DepositPolicy};
use crate::error::EngineError;
use crate::models::{
    DepositCalculation, DepositQuote, EstimateResult, SpecialDateEntry, TravelFeeResult,
    cents_to_dollars,
};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input '{}': {}", field, message),
                    format!("Check the '{}' field and retry", field),
                ),
            },
            EngineError::InvalidSurgeMultiplier { date, multiplier } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INVALID_SURGE_MULTIPLIER",
                    format!("Surge pricing for {} is misconfigured", date),
                    format!(
                        "Multiplier {} is outside the allowed range [1.25, 3.0]",
                        multiplier
                    ),
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
        }
    }
}

/// Deposit recommendation attached to an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositBreakdown {
    /// Recommended deposit in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub recommended_amount: Decimal,
    /// Deposit as a percentage of the estimate.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    /// Lower edge of the deposit band, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub min_percent: Decimal,
    /// Upper edge of the deposit band, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub max_percent: Decimal,
    /// Lattice calculation detail (amounts in cents).
    pub calculation: DepositCalculation,
}

impl DepositBreakdown {
    /// Presents a calculation against the policy that produced it.
    pub fn new(policy: &DepositPolicy, calculation: DepositCalculation) -> Self {
        Self {
            recommended_amount: cents_to_dollars(calculation.value),
            percentage: calculation.percentage,
            min_percent: (policy.min_percent * Decimal::ONE_HUNDRED).normalize(),
            max_percent: (policy.max_percent * Decimal::ONE_HUNDRED).normalize(),
            calculation,
        }
    }
}

/// Response body for `POST /estimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    /// The event cost.
    pub estimate: EstimateResult,
    /// The recommended deposit for `estimate.total_cost`.
    pub deposit: DepositBreakdown,
    /// Travel surcharge, when a distance was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_fee: Option<TravelFeeResult>,
    /// Estimate plus travel fee, when a distance was given.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_with_travel: Option<Decimal>,
}

/// Response body for `POST /deposit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    /// The deposit in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub deposit: Decimal,
    /// The deposit in cents.
    pub deposit_cents: i64,
    /// Deposit as a percentage of the estimate.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    /// How the amount was chosen.
    pub picked_by: String,
    /// True when the caller supplied the amount.
    pub is_manual_override: bool,
    /// Lattice calculation detail, absent for overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<DepositCalculation>,
}

impl From<DepositQuote> for DepositResponse {
    fn from(quote: DepositQuote) -> Self {
        Self {
            deposit: cents_to_dollars(quote.deposit_cents),
            deposit_cents: quote.deposit_cents,
            percentage: quote.percentage,
            picked_by: quote.picked_by,
            is_manual_override: quote.is_manual_override,
            calculation: quote.calculation,
        }
    }
}

/// Response body for `GET /special-dates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDatesResponse {
    /// First year listed.
    pub from_year: i32,
    /// Number of years listed.
    pub years: u32,
    /// Calendar rows, by date then precedence.
    pub entries: Vec<SpecialDateEntry>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the server is serving.
    pub status: String,
    /// The loaded schedule.
    pub business: BusinessMetadata,
}
