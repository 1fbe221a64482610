//! Lookup domain types
//!
//! `NormalizedLookup` is what the check-email endpoint returns, `NewLookup`
//! is what gets written to a store and `LookupRecord` is what comes back out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reputation categories reported by EmailRep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Reputation {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Reputation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }

    /// Unknown labels collapse to `None`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::None,
        }
    }
}

impl From<Option<String>> for Reputation {
    fn from(label: Option<String>) -> Self {
        label.as_deref().map(Self::from_label).unwrap_or_default()
    }
}

impl std::fmt::Display for Reputation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-shape view of an EmailRep response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLookup {
    pub email: String,
    pub reputation: Reputation,
    pub suspicious: bool,
    pub references: u64,
    pub details: LookupDetails,
}

/// Detail flags and labels from the `details` object of an EmailRep response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupDetails {
    pub blacklisted: bool,
    pub malicious_activity: bool,
    pub credentials_leaked: bool,
    pub data_breach: bool,
    pub spam: bool,
    pub free_provider: bool,
    pub disposable: bool,
    pub deliverable: bool,
    pub spf_strict: bool,
    pub dmarc_enforced: bool,
    pub domain_reputation: String,
    pub first_seen: String,
    pub last_seen: String,
    pub profiles: Vec<String>,
}

/// A record ready to be persisted; the store assigns `id` and `checked_at`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLookup {
    pub email: String,
    pub reputation: Reputation,
    pub suspicious: bool,
    pub reference_count: u64,
    pub data_breach: bool,
    pub credentials_leaked: bool,
    pub spam: bool,
    pub disposable: bool,
}

impl From<&NormalizedLookup> for NewLookup {
    fn from(lookup: &NormalizedLookup) -> Self {
        Self {
            email: lookup.email.clone(),
            reputation: lookup.reputation,
            suspicious: lookup.suspicious,
            reference_count: lookup.references,
            data_breach: lookup.details.data_breach,
            credentials_leaked: lookup.details.credentials_leaked,
            spam: lookup.details.spam,
            disposable: lookup.details.disposable,
        }
    }
}

/// A persisted lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub reputation: Reputation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suspicious: bool,
    #[serde(default, deserialize_with = "lenient_count")]
    pub reference_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_breach: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credentials_leaked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spam: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disposable: bool,
    pub checked_at: DateTime<Utc>,
}

/// Columns written by other clients may be NULL.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts written by other clients may be negative, fractional or strings.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(crate::services::normalization::count(Some(&value)))
}

impl LookupRecord {
    pub fn from_new(id: i64, lookup: NewLookup, checked_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: lookup.email,
            reputation: lookup.reputation,
            suspicious: lookup.suspicious,
            reference_count: lookup.reference_count,
            data_breach: lookup.data_breach,
            credentials_leaked: lookup.credentials_leaked,
            spam: lookup.spam,
            disposable: lookup.disposable,
            checked_at,
        }
    }
}

/// The two columns the stats aggregator reads.
///
/// `reputation` is kept raw so rows written by other clients with unknown
/// or missing labels are still counted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScanRow {
    #[serde(default)]
    pub reputation: Option<String>,
    #[serde(default)]
    pub suspicious: Option<bool>,
}

impl ScanRow {
    pub fn new(reputation: Option<&str>, suspicious: bool) -> Self {
        Self {
            reputation: reputation.map(str::to_string),
            suspicious: Some(suspicious),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reputation_from_label() {
        assert_eq!(Reputation::from_label("high"), Reputation::High);
        assert_eq!(Reputation::from_label(" Medium "), Reputation::Medium);
        assert_eq!(Reputation::from_label("LOW"), Reputation::Low);
        assert_eq!(Reputation::from_label("bogus"), Reputation::None);
        assert_eq!(Reputation::from_label(""), Reputation::None);
    }

    #[test]
    fn test_reputation_serde() {
        assert_eq!(serde_json::to_string(&Reputation::High).unwrap(), "\"high\"");

        let parsed: Reputation = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(parsed, Reputation::None);

        let parsed: Reputation = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Reputation::None);
    }

    #[test]
    fn test_record_from_rest_row() {
        let row = serde_json::json!({
            "id": 7,
            "email": "bill@microsoft.com",
            "reputation": "high",
            "suspicious": false,
            "reference_count": 42,
            "data_breach": null,
            "checked_at": "2025-12-01T10:15:00.123456+00:00"
        });

        let record: LookupRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.reputation, Reputation::High);
        assert_eq!(record.reference_count, 42);
        assert!(!record.data_breach);
        assert!(!record.spam);
    }

    #[test]
    fn test_record_with_loose_reference_count() {
        let row = |count: serde_json::Value| {
            serde_json::json!({
                "id": 1,
                "email": "a@b.com",
                "reputation": "low",
                "suspicious": true,
                "reference_count": count,
                "checked_at": "2025-12-01T10:15:00+00:00"
            })
        };

        let cases = [
            (serde_json::json!(-3), 0),
            (serde_json::json!(2.5), 2),
            (serde_json::json!("7"), 7),
            (serde_json::Value::Null, 0),
        ];
        for (count, expected) in cases {
            let record: LookupRecord = serde_json::from_value(row(count.clone())).unwrap();
            assert_eq!(record.reference_count, expected, "reference_count {}", count);
        }
    }
}
