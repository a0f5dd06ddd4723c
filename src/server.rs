//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::models::AppConfig;
use crate::services::{MaskProvider, SegmentationClient, Session};

/// Application state shared across all handlers.
///
/// The session lock is only held for quick reads and updates. Mask requests
/// queue on `mask_requests` instead, so at most one segmentation round-trip
/// is in flight while the other endpoints stay responsive.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: Arc<Mutex<Session>>,
    pub mask_requests: Arc<Mutex<()>>,
    pub provider: Arc<dyn MaskProvider>,
}

impl AppState {
    pub fn new(config: AppConfig, provider: Arc<dyn MaskProvider>) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(Session::new())),
            mask_requests: Arc::new(Mutex::new(())),
            provider,
        }
    }
}

/// Create application state talking to the configured segmentation service.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let client = SegmentationClient::new(&config.segmentation, config.mask)
        .map_err(|e| anyhow::anyhow!("Failed to create segmentation client: {e}"))?;

    tracing::info!(
        endpoint = %client.endpoint(),
        feather_sigma = config.mask.feather_sigma,
        mask_channel = ?config.mask.channel,
        "Segmentation client configured"
    );

    Ok(AppState::new(config, Arc::new(client)))
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Responses depend on mutable session state, so none may be cached.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/session", get(api::handle_session))
        .route("/api/image", post(api::handle_upload))
        .route("/api/mask", post(api::handle_mask))
        .route("/api/paint", get(api::handle_paint))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
}
