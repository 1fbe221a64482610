use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::services;
use crate::state::AppState;
use crate::types::error::GuardError;
use crate::types::responses::{LookupsResponse, SavedResponse};

/// `limit` stays a string so a bad value falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct LookupsQuery {
    pub limit: Option<String>,
}

/// GET /api/lookups?limit=N
pub async fn list_lookups(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupsQuery>,
) -> Result<Json<LookupsResponse>, GuardError> {
    let lookups = services::recent_lookups(state.store.as_ref(), query.limit.as_deref()).await?;

    Ok(Json(LookupsResponse { ok: true, lookups }))
}

/// POST /api/lookups
pub async fn save_lookup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SavedResponse>, GuardError> {
    let body = super::json_body(payload)?;
    let saved = services::save_lookup(state.store.as_ref(), &body).await?;

    Ok(Json(SavedResponse { ok: true, saved }))
}
