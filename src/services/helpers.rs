//! Shared helper functions
//!
//! Input parsing used across services and routes.

use crate::types::error::{GuardError, Result};

pub const DEFAULT_LOOKUP_LIMIT: usize = 10;
pub const MAX_LOOKUP_LIMIT: usize = 50;

/// Parse the `limit` query parameter.
///
/// Missing or non-numeric values fall back to the default; numbers are
/// clamped to `1..=MAX_LOOKUP_LIMIT`.
pub fn parse_limit(raw: Option<&str>) -> usize {
    match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
        Some(n) => n.clamp(1, MAX_LOOKUP_LIMIT as i64) as usize,
        None => DEFAULT_LOOKUP_LIMIT,
    }
}

/// Trimmed email address, or a validation error when there is none
pub fn require_email(email: Option<&str>) -> Result<&str> {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| GuardError::InvalidInput("Email is required.".to_string()))
}

/// Domain part of an address, for logs that should not carry the full email
pub fn email_domain(email: &str) -> &str {
    email.rsplit_once('@').map(|(_, domain)| domain).unwrap_or("")
}
