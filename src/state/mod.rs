//! Application state management
//!
//! One `AppState` is built at startup and shared by every handler behind
//! an `Arc`. Nothing in it is mutated after construction; the store
//! backend owns whatever synchronization it needs.

use std::sync::Arc;

use crate::adapters::emailrep::EmailRepClient;
use crate::adapters::{self, LookupStore};
use crate::config::AppConfig;
use crate::types::error::Result;

pub struct AppState {
    pub config: AppConfig,
    pub emailrep: EmailRepClient,
    pub store: Arc<dyn LookupStore>,
}

impl AppState {
    /// Build state with the store selected by the configuration
    pub fn from_config(config: AppConfig) -> Result<Arc<Self>> {
        let store = adapters::open_store(&config.store)?;
        Self::with_store(config, store)
    }

    /// Build state around an existing store
    pub fn with_store(config: AppConfig, store: Arc<dyn LookupStore>) -> Result<Arc<Self>> {
        let emailrep = EmailRepClient::new(&config.emailrep)?;

        Ok(Arc::new(Self {
            config,
            emailrep,
            store,
        }))
    }
}
