//! Lookup service
//!
//! Business logic behind the HTTP routes: fetch, normalize, persist, list
//! and aggregate.

use serde_json::Value;
use tracing::{info, warn};

use super::helpers::{email_domain, parse_limit, require_email};
use super::{normalization, stats};
use crate::adapters::emailrep::EmailRepClient;
use crate::adapters::LookupStore;
use crate::types::error::Result;
use crate::types::responses::{CheckEmailResponse, LookupStats};
use crate::types::LookupRecord;

/// Look up an address on EmailRep and persist the normalized result.
///
/// A failed write is logged and reported through `saved`; the lookup
/// itself still succeeds.
pub async fn check_email(
    client: &EmailRepClient,
    store: &dyn LookupStore,
    email: Option<&str>,
) -> Result<CheckEmailResponse> {
    let email = require_email(email)?;
    info!(domain = email_domain(email), "Checking email reputation");

    let raw = client.query(email).await?;
    let result = normalization::normalize(email, &raw);

    let saved = match store.insert((&result).into()).await {
        Ok(record) => {
            info!(id = record.id, reputation = %record.reputation, "Saved lookup");
            true
        }
        Err(e) => {
            warn!(domain = email_domain(email), "Failed to save lookup: {}", e);
            false
        }
    };

    Ok(CheckEmailResponse { result, saved })
}

/// Persist a lookup submitted by a client.
pub async fn save_lookup(store: &dyn LookupStore, body: &Value) -> Result<LookupRecord> {
    let lookup = normalization::lookup_from_submission(body)?;
    let record = store.insert(lookup).await?;
    info!(id = record.id, domain = email_domain(&record.email), "Saved submitted lookup");
    Ok(record)
}

/// Most recent lookups, `limit` as received in the query string.
pub async fn recent_lookups(store: &dyn LookupStore, limit: Option<&str>) -> Result<Vec<LookupRecord>> {
    store.recent(parse_limit(limit)).await
}

pub async fn lookup_stats(store: &dyn LookupStore) -> Result<LookupStats> {
    let rows = store.scan().await?;
    Ok(stats::aggregate(&rows))
}
