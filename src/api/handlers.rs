//! Axum request handlers for the HTTP API.
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::prompt::build_prompt;
use crate::room::{RoomDescription, RoomValidator};
use crate::utils::data_url;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub image_data_url: String,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Validate the room, build the prompt and ask the gateway for one image.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<GenerateResponse>> {
    let room = parse_room(&state.validator, &body)?;
    let prompt = build_prompt(&room);
    let size = room.output_size();
    tracing::info!(%size, prompt_chars = prompt.len(), "Generating room image");

    let cancel = CancellationToken::new();
    // Dropping this handler (client went away) cancels the provider call.
    let _guard = cancel.clone().drop_guard();
    let gateway = Arc::clone(&state.gateway);
    let task = tokio::spawn(
        async move { gateway.generate(&prompt, size, &cancel).await }.in_current_span(),
    );
    let image = task
        .await
        .map_err(|e| AppError::Internal(format!("generation task failed: {}", e)))??;

    tracing::info!(bytes = image.bytes.len(), "Room image ready");
    Ok(Json(GenerateResponse { image_data_url: data_url::encode(&image) }))
}

/// Same validation as `generate`, but only returns the prompt text.
pub async fn preview_prompt(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<PromptResponse>> {
    let room = parse_room(&state.validator, &body)?;
    Ok(Json(PromptResponse { prompt: build_prompt(&room) }))
}

fn parse_room(validator: &RoomValidator, body: &[u8]) -> AppResult<RoomDescription> {
    let raw: Value = serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    Ok(validator.validate(&raw)?)
}
