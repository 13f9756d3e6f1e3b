//! Engage Server - engagement dashboard API
//!
//! Stateless HTTP server for the users-by-time-of-the-day heatmap and the
//! Teams contract table. Callers post the samples they fetched; nothing is
//! stored between requests.

pub mod config;
pub mod http;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{FixedOffset, Offset, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    /// Viewer offset used when a request does not send one
    pub default_offset: FixedOffset,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let default_offset = config.default_offset()?;
        Ok(Self {
            config,
            default_offset,
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: ServerConfig::default(),
            default_offset: Utc.fix(),
        }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Engagement dashboard endpoints
        .route(
            "/engagement-dashboard/users/users-by-time-of-the-day",
            post(http::users_by_time_of_day),
        )
        .route(
            "/engagement-dashboard/users/users-by-time-of-the-day/csv",
            post(http::users_by_time_of_day_csv),
        )
        .route("/engagement-dashboard/periods/{preset}", get(http::get_period))
        // Contract endpoints
        .route("/contracts/teams", get(http::list_contracts))
        .route("/contracts/teams/{name}", get(http::get_contract))
        .route("/contracts/teams/{name}/check", post(http::check_contract))
        // System endpoints
        .route("/status", get(http::get_status))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Engage server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
