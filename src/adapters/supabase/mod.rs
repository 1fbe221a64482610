//! Hosted table store over PostgREST (Supabase)
//!
//! The table assigns `id` and `checked_at` through column defaults, so
//! inserts ask for the stored row back with `Prefer: return=representation`.
//!
//! Expected table:
//! ```sql
//! create table email_lookups (
//!   id bigint generated always as identity primary key,
//!   email text not null,
//!   reputation text not null default 'none',
//!   suspicious boolean not null default false,
//!   reference_count bigint not null default 0,
//!   data_breach boolean not null default false,
//!   credentials_leaked boolean not null default false,
//!   spam boolean not null default false,
//!   disposable boolean not null default false,
//!   checked_at timestamptz not null default now()
//! );
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::LookupStore;
use crate::config::SupabaseConfig;
use crate::types::error::{GuardError, Result};
use crate::types::{LookupRecord, NewLookup, ScanRow};

pub struct SupabaseStore {
    http: reqwest::Client,
    table_url: Url,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let (url, key) = match (&config.url, &config.key) {
            (Some(url), Some(key)) => (url, key),
            _ => {
                return Err(GuardError::Config(
                    "Supabase store requires a URL and a key".to_string(),
                ))
            }
        };

        let table_url = table_url(url, &config.table)?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", key))?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GuardError::Config(format!("HTTP client error: {}", e)))?;

        Ok(Self { http, table_url })
    }

    fn select_url(&self, query: &[(&str, &str)]) -> Url {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().extend_pairs(query);
        url
    }

    async fn read_rows<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        operation: &str,
    ) -> Result<Vec<T>> {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GuardError::Database(format!("{}: {}", operation, e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            warn!(status = status.as_u16(), "{} failed: {}", operation, message);
            return Err(GuardError::Database(format!(
                "{} (HTTP {}): {}",
                operation,
                status.as_u16(),
                message
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            GuardError::Database(format!("{}: unexpected response: {}", operation, e))
        })
    }
}

fn table_url(base: &str, table: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| GuardError::Config(format!("Invalid Supabase URL {}: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| GuardError::Config(format!("Supabase URL cannot be a base: {}", base)))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);

    Ok(url)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|e| GuardError::Config(format!("Invalid Supabase key: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

#[async_trait]
impl LookupStore for SupabaseStore {
    async fn insert(&self, lookup: NewLookup) -> Result<LookupRecord> {
        debug!(email = %lookup.email, "Inserting lookup into Supabase");

        let resp = self
            .http
            .post(self.table_url.clone())
            .header("Prefer", "return=representation")
            .json(&[&lookup])
            .send()
            .await
            .map_err(|e| GuardError::Database(format!("DB insert failed: {}", e)))?;

        self.read_rows::<LookupRecord>(resp, "DB insert failed")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GuardError::Database("DB insert failed: no row returned".to_string()))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<LookupRecord>> {
        let limit = limit.to_string();
        let url = self.select_url(&[
            ("select", "*"),
            ("order", "checked_at.desc,id.desc"),
            ("limit", &limit),
        ]);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GuardError::Database(format!("DB read failed: {}", e)))?;

        self.read_rows(resp, "DB read failed").await
    }

    /// Reads a single page. PostgREST caps responses (1000 rows by default on
    /// Supabase), so stats over a larger table undercount.
    async fn scan(&self) -> Result<Vec<ScanRow>> {
        let url = self.select_url(&[("select", "reputation,suspicious")]);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GuardError::Database(format!("DB stats failed: {}", e)))?;

        self.read_rows(resp, "DB stats failed").await
    }
}
