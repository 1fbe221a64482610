//! HTTP route handlers
//!
//! Thin wrappers: extract the request, call into `services`, wrap the
//! result in a response type.

mod check_email;
mod lookups;
mod stats;

pub use check_email::*;
pub use lookups::*;
pub use stats::*;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::types::error::GuardError;

/// Malformed JSON bodies are validation errors with the usual `{error}` body.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, GuardError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| GuardError::InvalidInput(rejection.body_text()))
}
