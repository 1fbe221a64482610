#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use emailguard_lib::adapters::LookupStore;
use emailguard_lib::config::AppConfig;
use emailguard_lib::state::AppState;
use emailguard_lib::types::{GuardError, LookupRecord, NewLookup, ScanRow};

pub const API_KEY: &str = "test-key";

/// How long the fake takes to answer for `slow@...`
pub const SLOW_RESPONSE: Duration = Duration::from_secs(3);

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Stand-in for emailrep.io; the local part of the address picks the behaviour.
async fn fake_emailrep(uri: Uri, headers: HeaderMap) -> Response {
    let email = uri.path().trim_start_matches('/').to_string();
    let local = email.split('@').next().unwrap_or_default();

    let agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if agent != "EmailGuard/1.0" {
        return (StatusCode::FORBIDDEN, Json(json!({ "reason": "missing user agent" }))).into_response();
    }

    match local {
        "limited" => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "status": "fail", "reason": "exceeded daily limit" })),
        )
            .into_response(),
        "invalid" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "fail", "reason": "invalid email" })),
        )
            .into_response(),
        "teapot" => (StatusCode::IM_A_TEAPOT, "short and stout").into_response(),
        "garbled" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "slow" => {
            tokio::time::sleep(SLOW_RESPONSE).await;
            Json(json!({ "email": email, "reputation": "high" })).into_response()
        }
        "keyed" => {
            let key = headers.get("key").and_then(|v| v.to_str().ok());
            if key == Some(API_KEY) {
                Json(json!({ "email": email, "reputation": "medium" })).into_response()
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({ "reason": "invalid key" }))).into_response()
            }
        }
        _ => {
            let reputation = if local == "trusted" { "high" } else { "low" };
            Json(json!({
                "email": email,
                "reputation": reputation,
                "suspicious": 1,
                "references": "12",
                "details": {
                    "blacklisted": true,
                    "data_breach": "yes",
                    "credentials_leaked": 1,
                    "spam": 0,
                    "disposable": null,
                    "first_seen": "07/01/2008"
                }
            }))
            .into_response()
        }
    }
}

pub async fn spawn_fake_emailrep() -> String {
    serve(Router::new().fallback(fake_emailrep)).await
}

/// Base URL of a port nothing listens on
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn config(emailrep_base: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.emailrep.base_url = emailrep_base.to_string();
    config.emailrep.timeout_secs = 5;
    config
}

pub async fn spawn_app(config: AppConfig, store: Arc<dyn LookupStore>) -> String {
    let state = AppState::with_store(config, store).expect("failed to build state");
    serve(emailguard_lib::app(state)).await
}

/// Store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl LookupStore for FailingStore {
    async fn insert(&self, _lookup: NewLookup) -> Result<LookupRecord, GuardError> {
        Err(GuardError::Database("DB insert failed: disk full".into()))
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<LookupRecord>, GuardError> {
        Err(GuardError::Database("DB read failed: disk full".into()))
    }

    async fn scan(&self) -> Result<Vec<ScanRow>, GuardError> {
        Err(GuardError::Database("DB stats failed: disk full".into()))
    }
}
