//! Archive API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p archive-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use archive_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_app(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        data_root = %config.archive.data_root.display(),
        "Configuration loaded"
    );

    archive_api::run(config).await?;

    Ok(())
}
