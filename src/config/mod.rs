//! Configuration loading and management for the pricing engine.
//!
//! Pricing schedules are immutable values injected into every calculation.
//! [`PricingConfig::standard`] returns the compiled-in schedule;
//! [`ConfigLoader`] reads an equivalent schedule from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use event_pricing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded schedule: {}", config.business().name);
//! ```

mod loader;
mod standard;
mod types;

pub use loader::ConfigLoader;
pub use standard::SURGE_LABEL;
pub use types::{
    BusinessMetadata, DatedRuleEntry, DepositPolicy, PricingConfig, RateEntry, RateFileEntry,
    RateTable, RatesFile, SURGE_MULTIPLIER_MAX, SURGE_MULTIPLIER_MIN, SpecialDateTables,
    SpecialDatesFile, TravelPolicy, is_valid_surge_multiplier,
};
