//! Shared state and the router used by the binary and the integration tests.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::error::panic_response;
use crate::gateway::ImageGateway;
use crate::room::RoomValidator;

/// Read-only state shared by every request.
pub struct AppState {
    pub gateway: Arc<dyn ImageGateway>,
    pub validator: RoomValidator,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/generate", post(handlers::generate))
        .route("/api/prompt", post(handlers::preview_prompt))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
