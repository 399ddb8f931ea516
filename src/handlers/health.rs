//! Health check handlers

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{db, state::AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub version: String,
}

/// Health check endpoint; degraded when the store is unreachable
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = db::test_connection(state.db()).await.is_ok();
    Json(HealthResponse {
        status: if database { "healthy" } else { "degraded" }.to_string(),
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
