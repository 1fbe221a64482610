pub mod lookups;
pub mod pool;
pub mod schema;

pub use pool::DbPool;

use async_trait::async_trait;
use std::path::Path;
use tracing::info;

use super::LookupStore;
use crate::types::error::{GuardError, Result};
use crate::types::{LookupRecord, NewLookup, ScanRow};

/// Lookup store backed by a local SQLite file
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening SQLite lookup store at {:?}", path);
        Self::with_pool(pool::create_pool(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_pool(pool::create_memory_pool()?)
    }

    fn with_pool(pool: DbPool) -> Result<Self> {
        schema::initialize_schema(&*pool.get()?)?;
        Ok(Self { pool })
    }

    /// rusqlite blocks, keep it off the async workers
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&DbPool) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || f(&pool))
            .await
            .map_err(|e| GuardError::Database(format!("SQLite task failed: {}", e)))?
    }
}

#[async_trait]
impl LookupStore for SqliteStore {
    async fn insert(&self, lookup: NewLookup) -> Result<LookupRecord> {
        self.blocking(move |pool| lookups::insert_lookup(pool, lookup)).await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<LookupRecord>> {
        self.blocking(move |pool| lookups::recent_lookups(pool, limit)).await
    }

    async fn scan(&self) -> Result<Vec<ScanRow>> {
        self.blocking(lookups::scan_lookups).await
    }
}
