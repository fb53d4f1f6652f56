//! Error type shared by the HTTP handlers.
//!
//! Every failure a handler can hit ends up here and is turned into a JSON
//! `{ "error": ... }` body with the matching status code.
use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::gateway::GatewayError;
use crate::room::ValidationErrors;

pub const INVALID_FIELDS: &str = "Invalid fields";
pub const NO_IMAGE: &str = "No image result from the model.";
pub const INTERNAL: &str = "Internal error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Response for a handler that panicked; keeps the JSON error shape.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidBody(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": format!("Invalid request body: {}", msg) }))
            }
            AppError::Validation(details) => {
                tracing::info!(%details, "Rejected room description");
                (StatusCode::BAD_REQUEST, json!({ "error": INVALID_FIELDS, "details": details }))
            }
            AppError::Gateway(GatewayError::EmptyPayload) => {
                tracing::warn!("Provider returned no image");
                (StatusCode::BAD_GATEWAY, json!({ "error": NO_IMAGE }))
            }
            AppError::Gateway(err) => {
                tracing::error!(error = %err, "Image generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": err.to_string() }))
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": INTERNAL }))
            }
        };
        (status, Json(body)).into_response()
    }
}
