use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::services;
use crate::state::AppState;
use crate::types::error::GuardError;
use crate::types::responses::StatsResponse;

/// GET /api/stats
pub async fn lookup_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, GuardError> {
    let stats = services::lookup_stats(state.store.as_ref()).await?;

    Ok(Json(StatsResponse { ok: true, stats }))
}
