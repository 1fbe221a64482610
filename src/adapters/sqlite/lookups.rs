use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tracing::debug;

use super::DbPool;
use crate::types::error::GuardError;
use crate::types::{LookupRecord, NewLookup, Reputation, ScanRow};

const LOOKUP_COLUMNS: &str = "id, email, reputation, suspicious, reference_count,
    data_breach, credentials_leaked, spam, disposable, checked_at";

fn row_to_lookup(row: &Row) -> rusqlite::Result<LookupRecord> {
    let reputation: Option<String> = row.get(2)?;
    let reference_count: i64 = row.get(4)?;
    let checked_at: i64 = row.get(9)?;

    Ok(LookupRecord {
        id: row.get(0)?,
        email: row.get(1)?,
        reputation: Reputation::from(reputation),
        suspicious: row.get(3)?,
        reference_count: reference_count.max(0) as u64,
        data_breach: row.get(5)?,
        credentials_leaked: row.get(6)?,
        spam: row.get(7)?,
        disposable: row.get(8)?,
        checked_at: DateTime::from_timestamp_millis(checked_at).unwrap_or_default(),
    })
}

pub fn insert_lookup(pool: &DbPool, lookup: NewLookup) -> Result<LookupRecord, GuardError> {
    let conn = pool.get()?;
    let checked_at = Utc::now();

    conn.execute(
        "INSERT INTO email_lookups (
            email, reputation, suspicious, reference_count,
            data_breach, credentials_leaked, spam, disposable, checked_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            lookup.email,
            lookup.reputation.as_str(),
            lookup.suspicious,
            i64::try_from(lookup.reference_count).unwrap_or(i64::MAX),
            lookup.data_breach,
            lookup.credentials_leaked,
            lookup.spam,
            lookup.disposable,
            checked_at.timestamp_millis(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    debug!(id, email = %lookup.email, "Inserted lookup");

    // Round-trip through millis so the returned record matches a later read
    let checked_at = DateTime::from_timestamp_millis(checked_at.timestamp_millis())
        .unwrap_or(checked_at);

    Ok(LookupRecord::from_new(id, lookup, checked_at))
}

/// Most recent lookups first; rows inserted within the same millisecond
/// keep insertion order through the id tie-break.
pub fn recent_lookups(pool: &DbPool, limit: usize) -> Result<Vec<LookupRecord>, GuardError> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM email_lookups ORDER BY checked_at DESC, id DESC LIMIT ?1",
        LOOKUP_COLUMNS
    ))?;

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt
        .query_map(params![limit], row_to_lookup)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub fn scan_lookups(pool: &DbPool) -> Result<Vec<ScanRow>, GuardError> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare("SELECT reputation, suspicious FROM email_lookups")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ScanRow {
                reputation: row.get(0)?,
                suspicious: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}
