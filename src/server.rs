//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::AppConfig;
use crate::services::{HttpImageFetcher, ImageFetcher, RenderService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub fetcher: Arc<dyn ImageFetcher>,
    pub renderer: Arc<RenderService>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: Arc<AppConfig>) -> anyhow::Result<AppState> {
    let fetcher = HttpImageFetcher::new(
        Duration::from_secs(config.fetch_timeout_secs),
        config.max_fetch_bytes,
    )
    .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

    Ok(AppState {
        config,
        fetcher: Arc::new(fetcher),
        renderer: Arc::new(RenderService::new()),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/halograph/render", get(api::handle_render))
        .route("/api/halograph/proxy", get(api::handle_proxy))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
