//! Response types for the HTTP API
//!
//! These types are serialized and sent to the static page.
//! They should be lean and contain only what the page needs.

use serde::{Deserialize, Serialize};

use super::lookup::{LookupRecord, NormalizedLookup};

// ============================================================================
// Check-email Response Types
// ============================================================================

/// Response for `POST /api/check-email`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckEmailResponse {
    pub result: NormalizedLookup,
    /// Whether the lookup was persisted
    pub saved: bool,
}

// ============================================================================
// Lookup Store Response Types
// ============================================================================

/// Response for `GET /api/lookups`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupsResponse {
    pub ok: bool,
    pub lookups: Vec<LookupRecord>,
}

/// Response for `POST /api/lookups`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResponse {
    pub ok: bool,
    pub saved: LookupRecord,
}

// ============================================================================
// Stats Response Types
// ============================================================================

/// Per-category counts, always all four buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepCounts {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub none: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspiciousCounts {
    pub yes: u64,
    pub no: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupStats {
    pub rep_counts: RepCounts,
    pub suspicious: SuspiciousCounts,
}

/// Response for `GET /api/stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub stats: LookupStats,
}
