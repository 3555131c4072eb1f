//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// Create health router
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub started_at: String,
    pub uptime_seconds: u64,
    pub cache_entries: usize,
    pub team_members: usize,
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let team_members = state.ask.directory().len();

    // An empty directory means every question ends in "no records"
    let status = if team_members > 0 { "healthy" } else { "degraded" };

    Json(HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        cache_entries: state.ask.cache().len(),
        team_members,
    })
}
