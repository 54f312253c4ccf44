//! Route definitions
//!
//! Archive routes mounted under /api/v1, health checks at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{counts, health, metadata, threads};
use crate::state::AppState;

/// Create the main API router (health routes are merged separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(count_routes())
        .merge(metadata_routes())
        .merge(thread_routes())
}

/// Message count routes
fn count_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/workspaces/:workspace/channels/:channel/count",
            get(counts::get_count),
        )
        .route("/workspaces/:workspace/counts", post(counts::get_counts))
}

/// Cached metadata routes
fn metadata_routes() -> Router<AppState> {
    Router::new().route(
        "/workspaces/:workspace/metadata",
        get(metadata::get_metadata).delete(metadata::clear_metadata),
    )
}

/// Thread view routes
fn thread_routes() -> Router<AppState> {
    Router::new().route(
        "/workspaces/:workspace/channels/:channel/threads",
        get(threads::get_threads),
    )
}
