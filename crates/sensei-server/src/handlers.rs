//! Route handlers.

use axum::extract::State;
use axum::Json;
use sensei_core::{ChatRequest, ChatResponse, ChatService};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// POST /api/chat
///
/// Forwards the envelope to the chat service verbatim.
pub async fn chat(
    State(service): State<ChatService>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = service.handle(request).await?;
    Ok(Json(response))
}
