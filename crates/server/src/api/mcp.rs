//! MCP over HTTP: one JSON-RPC message per POST.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::mcp::handle_text;
use crate::state::AppState;

/// POST /mcp
///
/// Requests get `200` with the JSON-RPC response. Notifications get `202`
/// and an empty body. Malformed JSON still gets a JSON-RPC parse error.
pub async fn handle(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let text = String::from_utf8_lossy(&body);
    match handle_text(&state, &text).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
