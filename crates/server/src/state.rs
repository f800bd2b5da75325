//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::CustomerService;
use crate::store::CustomerStore;

/// Application state shared across all handlers.
///
/// Cheap to clone; every clone fronts the same store.
#[derive(Clone)]
pub struct AppState {
    customers: CustomerService,
}

impl AppState {
    /// Create a new application state over an existing store.
    ///
    /// The store is owned by the caller (normally `main`) so it can be shared
    /// with other front ends.
    #[must_use]
    pub const fn new(store: Arc<CustomerStore>) -> Self {
        Self {
            customers: CustomerService::new(store),
        }
    }

    /// Create state with a fresh store, seeded according to `config`.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let store = if config.seed_sample_data {
            CustomerStore::with_sample_data()
        } else {
            CustomerStore::new()
        };
        Self::new(Arc::new(store))
    }

    /// Get a reference to the customer service.
    #[must_use]
    pub const fn customers(&self) -> &CustomerService {
        &self.customers
    }
}
