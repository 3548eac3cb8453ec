//! Radar API server library logic.
//!
//! Serves the latest crawled snapshot as read-only JSON. Every handler
//! resolves the current snapshot afresh, so a rotated file is picked up by
//! the next request without a restart.

pub mod api;
pub mod config;

use axum::{extract::Extension, routing::get, Json, Router};
use radar_query::{LimitPolicy, QueryService};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "TrendRadar API Wrapper";

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Snapshot-backed read operations.
    pub service: QueryService,
    /// Defaults and bounds for client-supplied limits.
    pub limits: LimitPolicy,
}

impl AppState {
    pub fn new(service: QueryService, limits: LimitPolicy) -> Self {
        Self { service, limits }
    }
}

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub db: Option<String>,
}

/// Response body for `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `online` when a snapshot resolves, `db_missing` otherwise.
    pub status: &'static str,
    pub db: Option<String>,
}

/// Resolves the current snapshot off the async runtime.
pub(crate) async fn current_snapshot(state: Arc<AppState>) -> Option<PathBuf> {
    tokio::task::spawn_blocking(move || state.service.current_snapshot())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("snapshot resolution task failed: {}", e);
            None
        })
}

fn display_path(path: Option<PathBuf>) -> Option<String> {
    path.map(|p| p.display().to_string())
}

/// Handler for `GET /`.
///
/// Static service identity plus the snapshot a read would use right now.
async fn root(Extension(state): Extension<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        status: "online",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        db: display_path(current_snapshot(state).await),
    })
}

/// Handler for `GET /api/health`.
async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    let db = display_path(current_snapshot(state).await);
    let status = if db.is_some() { "online" } else { "db_missing" };
    Json(HealthResponse { status, db })
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/debug", get(api::debug_handler))
        .route("/api/trends", get(api::get_trends_handler))
        .route("/api/analysis", get(api::get_analysis_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
