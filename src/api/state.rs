//! Application state for the pricing API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PricingConfig};

/// Shared application state.
///
/// Holds the validated pricing schedule. It is read-only, so handlers share
/// it through an [`Arc`] with no locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded pricing configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Shorthand for the pricing schedule itself.
    pub fn pricing(&self) -> &PricingConfig {
        self.config.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_one_schedule() {
        let state = AppState::new(ConfigLoader::standard());
        let other = state.clone();
        assert!(std::ptr::eq(state.pricing(), other.pricing()));
    }
}
