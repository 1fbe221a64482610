use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::services;
use crate::state::AppState;
use crate::types::error::GuardError;
use crate::types::responses::CheckEmailResponse;

#[derive(Debug, Deserialize)]
pub struct CheckEmailRequest {
    pub email: Option<String>,
}

/// POST /api/check-email
pub async fn check_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckEmailRequest>, JsonRejection>,
) -> Result<Json<CheckEmailResponse>, GuardError> {
    let request = super::json_body(payload)?;

    let response =
        services::check_email(&state.emailrep, state.store.as_ref(), request.email.as_deref())
            .await?;

    Ok(Json(response))
}
