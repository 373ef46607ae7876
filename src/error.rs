//! Error types for the pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. Travel fees and deposits are
//! total functions and never produce one of these.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the pricing engine.
///
/// # Example
///
/// ```
/// use event_pricing::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "num_helpers".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'num_helpers': must be greater than zero");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A request value was missing or out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A surge rule carries a multiplier outside the permitted band.
    #[error("Surge multiplier {multiplier} on {date} is outside the allowed range [1.25, 3.0]")]
    InvalidSurgeMultiplier {
        /// The surge date whose rule is invalid.
        date: NaiveDate,
        /// The configured multiplier.
        multiplier: Decimal,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What the validation pass rejected.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("duration_hours", "must be greater than zero");
        assert_eq!(
            error.to_string(),
            "Invalid input 'duration_hours': must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_surge_multiplier_displays_date_and_multiplier() {
        let error = EngineError::InvalidSurgeMultiplier {
            date: NaiveDate::from_ymd_opt(2025, 2, 5).unwrap(),
            multiplier: Decimal::from_str("3.5").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Surge multiplier 3.5 on 2025-02-05 is outside the allowed range [1.25, 3.0]"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_message() {
        let error = EngineError::InvalidConfig {
            message: "rate table is empty".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid configuration: rate table is empty");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_input() -> EngineResult<()> {
            Err(EngineError::invalid_input("event_date", "is required"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
