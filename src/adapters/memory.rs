//! Non-persistent store, lookups are lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::LookupStore;
use crate::types::error::Result;
use crate::types::{LookupRecord, NewLookup, ScanRow};

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<LookupRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LookupStore for MemoryStore {
    async fn insert(&self, lookup: NewLookup) -> Result<LookupRecord> {
        let mut records = self.records.write().await;
        let id = records.last().map(|r| r.id + 1).unwrap_or(1);
        let record = LookupRecord::from_new(id, lookup, Utc::now());
        records.push(record.clone());
        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<LookupRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    async fn scan(&self) -> Result<Vec<ScanRow>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .map(|r| ScanRow::new(Some(r.reputation.as_str()), r.suspicious))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reputation;

    fn lookup(email: &str, reputation: Reputation) -> NewLookup {
        NewLookup {
            email: email.to_string(),
            reputation,
            suspicious: false,
            reference_count: 0,
            data_breach: false,
            credentials_leaked: false,
            spam: false,
            disposable: false,
        }
    }

    #[tokio::test]
    async fn test_recent_newest_first() {
        let store = MemoryStore::new();
        for i in 1..=5 {
            store
                .insert(lookup(&format!("user{}@example.com", i), Reputation::Low))
                .await
                .unwrap();
        }

        let recent = store.recent(3).await.unwrap();
        let emails: Vec<&str> = recent.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["user5@example.com", "user4@example.com", "user3@example.com"]);
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let store = MemoryStore::new();
        let first = store.insert(lookup("a@b.com", Reputation::High)).await.unwrap();
        let second = store.insert(lookup("c@d.com", Reputation::High)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.checked_at >= first.checked_at);
    }

    #[tokio::test]
    async fn test_scan() {
        let store = MemoryStore::new();
        store.insert(lookup("a@b.com", Reputation::High)).await.unwrap();
        store.insert(lookup("c@d.com", Reputation::None)).await.unwrap();

        let rows = store.scan().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].reputation.as_deref(), Some("high"));
        assert_eq!(rows[1].suspicious, Some(false));
    }
}
