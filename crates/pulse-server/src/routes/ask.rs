//! Question answering endpoint.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// Create ask router
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ask", post(ask))
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Answer a question about a team member.
///
/// Domain outcomes (unknown member, no activity, upstream failure) are all
/// reported through `answer` with a 200 status.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Json<AskResponse> {
    let answer = state.ask.handle(&req.query).await;
    Json(AskResponse { answer })
}
