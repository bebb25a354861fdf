//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub identity_api: String,
    pub posts: usize,
}

/// Liveness probe: always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe: reports the catalog size and the identity service in use.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let posts = state.store.read().await.posts.len();
    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        identity_api: state.identity.base_url().to_string(),
        posts,
    })
}
