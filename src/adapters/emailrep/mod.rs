//! EmailRep reputation lookups
//!
//! `GET {base_url}/{email}` returns a JSON document describing the address.
//! The client only deals with transport and status codes; shaping the body
//! is left to `services::normalization`.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::EmailRepConfig;
use crate::types::error::{GuardError, Result};

pub struct EmailRepClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl EmailRepClient {
    pub fn new(config: &EmailRepConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GuardError::Config(format!("Invalid EmailRep base URL {}: {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(GuardError::Config(format!(
                "EmailRep base URL cannot be a base: {}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GuardError::Config(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// URL for a single address, with the email as one percent-encoded path segment
    pub fn lookup_url(&self, email: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(email);
        }
        url
    }

    /// Query the reputation of `email` and return the raw JSON body.
    pub async fn query(&self, email: &str) -> Result<Value> {
        let url = self.lookup_url(email);
        debug!(%url, "Querying EmailRep");

        let mut request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            request = request.header("Key", key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| GuardError::Network(format!("EmailRep request failed: {}", e)))?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("EmailRep rate limit hit");
            return Err(GuardError::RateLimited);
        }

        let text = resp
            .text()
            .await
            .map_err(|e| GuardError::Network(format!("Failed to read EmailRep response: {}", e)))?;

        if !status.is_success() {
            let details = serde_json::from_str(&text).unwrap_or(Value::String(text));
            warn!(status = status.as_u16(), "EmailRep returned an error");
            return Err(GuardError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| GuardError::Parse(format!("Failed to parse EmailRep response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> EmailRepClient {
        EmailRepClient::new(&EmailRepConfig {
            base_url: base_url.to_string(),
            ..EmailRepConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_lookup_url() {
        let client = client("https://emailrep.io");
        assert_eq!(
            client.lookup_url("bill@microsoft.com").as_str(),
            "https://emailrep.io/bill@microsoft.com"
        );
    }

    #[test]
    fn test_lookup_url_encodes_segment() {
        let client = client("https://emailrep.io/");
        assert_eq!(
            client.lookup_url("a/b c@x.com").as_str(),
            "https://emailrep.io/a%2Fb%20c@x.com"
        );
    }

    #[test]
    fn test_lookup_url_keeps_base_path() {
        let client = client("http://127.0.0.1:9000/mock");
        assert_eq!(
            client.lookup_url("a@b.com").as_str(),
            "http://127.0.0.1:9000/mock/a@b.com"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = EmailRepClient::new(&EmailRepConfig {
            base_url: "not a url".to_string(),
            ..EmailRepConfig::default()
        });
        assert!(matches!(result, Err(GuardError::Config(_))));
    }
}
