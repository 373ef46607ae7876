//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a pricing
//! schedule from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::RuleKind;

use super::types::{
    BusinessMetadata, DepositPolicy, PricingConfig, RateEntry, RateTable, RatesFile,
    SpecialDateTables, SpecialDatesFile, TravelPolicy,
};

/// Loads and provides access to a validated pricing configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── business.yaml       # Business metadata
/// ├── rates.yaml          # Per-year helper rates
/// ├── special_dates.yaml  # Holiday multiplier, surge and legacy dates
/// ├── deposit.yaml        # Deposit band and lattice
/// └── travel.yaml         # Travel fee tiers
/// ```
///
/// Every table is validated once while loading, so a bad surge multiplier
/// stops the process at startup instead of failing individual requests.
///
/// # Example
///
/// ```no_run
/// use event_pricing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// println!("Loaded schedule: {}", loader.business().name);
/// # Ok::<(), event_pricing::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PricingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - A table fails validation (`InvalidConfig`, `InvalidSurgeMultiplier`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<BusinessMetadata>(&path.join("business.yaml"))?;
        let rates_file = Self::load_yaml::<RatesFile>(&path.join("rates.yaml"))?;
        let special_file = Self::load_yaml::<SpecialDatesFile>(&path.join("special_dates.yaml"))?;
        let deposit = Self::load_yaml::<DepositPolicy>(&path.join("deposit.yaml"))?;
        let travel = Self::load_yaml::<TravelPolicy>(&path.join("travel.yaml"))?;

        let rates = RateTable::new(rates_file.rates.into_iter().map(|row| {
            (
                row.year,
                RateEntry {
                    base_per_helper: row.base_per_helper,
                    extra_per_hour_per_helper: row.extra_per_hour_per_helper,
                },
            )
        }))?;

        let special_dates = SpecialDateTables::new(
            special_file.holiday_multiplier,
            special_file
                .surge
                .into_iter()
                .map(|row| row.into_rule(RuleKind::Surge)),
            special_file
                .legacy
                .into_iter()
                .map(|row| row.into_rule(RuleKind::Legacy)),
        );

        let config = PricingConfig::new(metadata, rates, special_dates, deposit, travel);
        let loader = Self::from_config(config)?;

        info!(
            code = %loader.business().code,
            years = loader.config.rates().entries().len(),
            surge_dates = loader.config.special_dates().surge().len(),
            legacy_dates = loader.config.special_dates().legacy().len(),
            "Pricing configuration loaded"
        );

        Ok(loader)
    }

    /// Wraps an already-built configuration, validating it first.
    pub fn from_config(config: PricingConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The compiled-in standard schedule.
    pub fn standard() -> Self {
        Self {
            config: PricingConfig::standard(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();
        debug!(path = %path_str, "Reading configuration file");

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying pricing configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Returns the business metadata.
    pub fn business(&self) -> &BusinessMetadata {
        self.config.business()
    }
}
