//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, ValidationLimits};
use crate::store::{InMemoryStore, RecordStore};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the record store and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state over `store`.
    pub fn new(store: Arc<dyn RecordStore>, config: ConfigLoader) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Application state backed by an empty in-memory store.
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), config)
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the configured validation limits.
    pub fn limits(&self) -> &ValidationLimits {
        self.config.limits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_store() {
        let state = AppState::in_memory(ConfigLoader::default());
        let clone = state.clone();
        assert!(std::ptr::addr_eq(state.store(), clone.store()));
        assert_eq!(clone.limits().max_name_length, 50);
    }
}
