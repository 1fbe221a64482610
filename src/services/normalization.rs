//! Mapping of loosely-typed JSON into lookup types
//!
//! EmailRep (and clients posting to `/api/lookups`) send whatever shape they
//! like. Every field goes through one of the coercions below so the rest of
//! the crate only sees fixed types.

use serde_json::Value;

use super::helpers::require_email;
use crate::types::error::Result;
use crate::types::{LookupDetails, NewLookup, NormalizedLookup, Reputation};

/// JavaScript-style truthiness.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Non-negative integer count, 0 for anything that isn't a usable number.
pub fn count(value: Option<&Value>) -> u64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n > 0.0 => n.floor() as u64,
        _ => 0,
    }
}

/// Textual label with a fallback for null or missing values.
pub fn label(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

pub fn reputation(value: Option<&Value>) -> Reputation {
    match value {
        Some(Value::String(s)) => Reputation::from_label(s),
        _ => Reputation::None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Normalize an EmailRep response body.
///
/// `requested_email` is used when the response doesn't echo the address.
pub fn normalize(requested_email: &str, raw: &Value) -> NormalizedLookup {
    let details = raw.get("details");
    let detail = |key: &str| details.and_then(|d| d.get(key));

    let profiles = detail("profiles")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    NormalizedLookup {
        email: non_empty_str(raw.get("email"))
            .unwrap_or(requested_email)
            .to_string(),
        reputation: reputation(raw.get("reputation")),
        suspicious: truthy(raw.get("suspicious")),
        references: count(raw.get("references")),
        details: LookupDetails {
            blacklisted: truthy(detail("blacklisted")),
            malicious_activity: truthy(detail("malicious_activity")),
            credentials_leaked: truthy(detail("credentials_leaked")),
            data_breach: truthy(detail("data_breach")),
            spam: truthy(detail("spam")),
            free_provider: truthy(detail("free_provider")),
            disposable: truthy(detail("disposable")),
            deliverable: truthy(detail("deliverable")),
            spf_strict: truthy(detail("spf_strict")),
            dmarc_enforced: truthy(detail("dmarc_enforced")),
            domain_reputation: label(detail("domain_reputation"), "n/a"),
            first_seen: label(detail("first_seen"), "never"),
            last_seen: label(detail("last_seen"), "never"),
            profiles,
        },
    }
}

/// Build a record from a `POST /api/lookups` body.
///
/// Accepts `references` or `reference_count` for the count.
pub fn lookup_from_submission(body: &Value) -> Result<NewLookup> {
    let email = require_email(body.get("email").and_then(Value::as_str))?;

    let references = body.get("references").or_else(|| body.get("reference_count"));

    Ok(NewLookup {
        email: email.to_string(),
        reputation: reputation(body.get("reputation")),
        suspicious: truthy(body.get("suspicious")),
        reference_count: count(references),
        data_breach: truthy(body.get("data_breach")),
        credentials_leaked: truthy(body.get("credentials_leaked")),
        spam: truthy(body.get("spam")),
        disposable: truthy(body.get("disposable")),
    })
}
