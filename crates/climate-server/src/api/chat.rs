//! Assistant chat endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;

use climate_core::{ChatRequest, ChatResponse};

use crate::chat::reply_or_fallback;
use crate::state::AppState;

/// Forward a message to the assistant. Always answers 200.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reply = reply_or_fallback(state.chat(), &req.message).await;
    Json(ChatResponse { reply })
}
