//! Health check handlers
//!
//! Endpoints for liveness and readiness checks.

use archive_service::{HealthResponse, ReadinessResponse};
use axum::{extract::State, http::StatusCode, Json};

use crate::state::AppState;

/// Basic health check (liveness)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check, the archive data root must be a readable directory
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let data_root = &state.config().archive.data_root;
    let data_root_healthy = tokio::fs::metadata(data_root)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    let response = ReadinessResponse::ready(data_root_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
