//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use archive_common::{AppConfig, AppError, AppResult};
use archive_service::ServiceContextBuilder;
use archive_store::{ArchiveLayout, FsChannelLoader, FsMetadataStore};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Wire the filesystem store and loader into an AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let data_root = &config.archive.data_root;
    let is_dir = tokio::fs::metadata(data_root)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(AppError::Config(format!(
            "archive data root is not a directory: {}",
            data_root.display()
        )));
    }

    let layout = ArchiveLayout::new(data_root.clone());
    let store = Arc::new(FsMetadataStore::new(layout.clone()));
    let loader = if config.archive.listing_cache {
        FsChannelLoader::with_listing_cache(layout)
    } else {
        FsChannelLoader::new(layout)
    };

    info!(
        data_root = %data_root.display(),
        listing_cache = config.archive.listing_cache,
        "Archive storage ready"
    );

    let service_context = ServiceContextBuilder::new()
        .store(store)
        .loader(Arc::new(loader))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until Ctrl+C
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    if let Ok(local) = listener.local_addr() {
        info!("Server listening on http://{}", local);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, &addr).await
}
