//! Unified error type for the application
//!
//! Every handler returns [`GuardError`]. The `IntoResponse` impl maps each
//! variant to a status code and a `{error, details?}` JSON body that the
//! static page shows to the user as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

pub const RATE_LIMIT_MESSAGE: &str =
    "EmailRep rate limit exceeded (HTTP 429). Try later or use an API key.";
pub const UPSTREAM_MESSAGE: &str = "EmailRep API error";
pub const CONTACT_FAILED_MESSAGE: &str = "Server failed to contact EmailRep.";

/// Application error type for routes and services
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    #[error("EmailRep API error (HTTP {status})")]
    Upstream { status: u16, details: Value },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl GuardError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Network(_)
            | Self::Parse(_)
            | Self::Database(_)
            | Self::Config(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the client.
    pub fn body(&self) -> Value {
        match self {
            Self::InvalidInput(msg) => json!({ "error": msg }),
            Self::RateLimited => json!({ "error": RATE_LIMIT_MESSAGE }),
            Self::Upstream { details, .. } => {
                json!({ "error": UPSTREAM_MESSAGE, "details": details })
            }
            Self::Network(_) | Self::Parse(_) => json!({ "error": CONTACT_FAILED_MESSAGE }),
            Self::Database(msg) => json!({ "error": "Database error", "details": msg }),
            Self::Config(_) | Self::Io(_) => json!({ "error": "Server error" }),
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        } else {
            warn!(status = status.as_u16(), "{}", self);
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<std::io::Error> for GuardError {
    fn from(err: std::io::Error) -> Self {
        GuardError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for GuardError {
    fn from(err: toml::de::Error) -> Self {
        GuardError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for GuardError {
    fn from(err: reqwest::Error) -> Self {
        GuardError::Network(err.to_string())
    }
}

impl From<r2d2::Error> for GuardError {
    fn from(err: r2d2::Error) -> Self {
        GuardError::Database(err.to_string())
    }
}

impl From<rusqlite::Error> for GuardError {
    fn from(err: rusqlite::Error) -> Self {
        GuardError::Database(err.to_string())
    }
}

/// Result type alias using GuardError
pub type Result<T> = std::result::Result<T, GuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_distinct_from_server_error() {
        let err = GuardError::RateLimited;
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.body()["error"], RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let err = GuardError::Upstream {
            status: 404,
            details: json!({ "reason": "not found" }),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body()["error"], UPSTREAM_MESSAGE);
        assert_eq!(err.body()["details"]["reason"], "not found");
    }

    #[test]
    fn test_invalid_upstream_status_maps_to_bad_gateway() {
        let err = GuardError::Upstream {
            status: 42,
            details: Value::Null,
        };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_network_error_is_generic() {
        let err = GuardError::Network("connection refused".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), json!({ "error": CONTACT_FAILED_MESSAGE }));
    }

    #[test]
    fn test_database_error_carries_message() {
        let err = GuardError::Database("disk full".into());
        assert_eq!(err.body()["details"], "disk full");
    }
}
