//! External systems: the EmailRep API and the lookup store backends
//!
//! Every backend implements [`LookupStore`]; the rest of the crate only holds
//! an `Arc<dyn LookupStore>` so backends are swapped through configuration.

pub mod emailrep;
pub mod memory;
pub mod sqlite;
pub mod supabase;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::types::error::Result;
use crate::types::{LookupRecord, NewLookup, ScanRow};

/// Persistence for lookup records.
///
/// Records are append-only: there is no update or delete.
#[async_trait]
pub trait LookupStore: Send + Sync {
    /// Persist one record; the store assigns `id` and `checked_at`.
    async fn insert(&self, lookup: NewLookup) -> Result<LookupRecord>;

    /// Up to `limit` records, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<LookupRecord>>;

    /// Reputation and suspicious columns of every record.
    async fn scan(&self) -> Result<Vec<ScanRow>>;
}

/// Open the store selected by `config`.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn LookupStore>> {
    let backend = config.resolved_backend()?;
    info!(?backend, "Opening lookup store");

    let store: Arc<dyn LookupStore> = match backend {
        StoreBackend::Supabase => Arc::new(supabase::SupabaseStore::new(&config.supabase)?),
        StoreBackend::Sqlite => Arc::new(sqlite::SqliteStore::open(&config.sqlite_path)?),
        StoreBackend::Memory => Arc::new(memory::MemoryStore::new()),
    };

    Ok(store)
}
