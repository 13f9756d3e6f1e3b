//! Engage Server Binary
//!
//! Standalone server for the engagement dashboard API.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use engage_server::config::ServerConfig;
use engage_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Initialize logging; RUST_LOG wins over the configured filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = config.addr.clone();
    let state = Arc::new(AppState::new(config)?);

    serve(&addr, state).await
}
