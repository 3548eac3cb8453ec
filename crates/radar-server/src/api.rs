//! Read endpoints backed by the current snapshot.
//!
//! Handlers never answer with an error status for snapshot problems. Missing
//! snapshots, missing tables and failed queries all produce an empty list;
//! only `/api/debug` reports what went wrong.

use crate::AppState;
use axum::extract::{Extension, Json, Query};
use radar_query::{Diagnostics, Outcome, Row, TrendItem, TrendQuery};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for `GET /api/trends`.
#[derive(Debug, Deserialize)]
pub struct TrendsParams {
    /// Maximum number of items (default: 50).
    pub limit: Option<i64>,
    /// Exact platform identifier to filter on.
    pub source: Option<String>,
}

/// Query parameters for `GET /api/analysis`.
#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    /// Maximum number of rows (default: 20).
    pub limit: Option<i64>,
}

/// Runs a snapshot read on the blocking pool and degrades anything but
/// success to an empty value.
async fn read_or_default<T, F>(operation: &'static str, read: F) -> T
where
    T: Default + Send + 'static,
    F: FnOnce() -> Outcome<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(read).await {
        Ok(outcome) => outcome.log(operation).unwrap_or_default(),
        Err(e) => {
            tracing::error!(operation, "snapshot read task failed: {}", e);
            T::default()
        }
    }
}

/// Handler for `GET /api/trends`.
pub async fn get_trends_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<TrendsParams>,
) -> Json<Vec<TrendItem>> {
    let query = TrendQuery {
        limit: state.limits.trends(params.limit),
        source: params.source,
    };
    tracing::info!(limit = query.limit, source = ?query.source, "requesting trends");

    let items = read_or_default("trends", move || state.service.trends(&query)).await;
    tracing::debug!(rows = items.len(), "trends response ready");
    Json(items)
}

/// Handler for `GET /api/analysis`.
pub async fn get_analysis_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
) -> Json<Vec<Row>> {
    let limit = state.limits.analysis(params.limit);
    Json(read_or_default("analysis", move || state.service.analysis(limit)).await)
}

/// Handler for `GET /api/debug`.
///
/// Reports tables, row counts, and the layout and first row of the news
/// table. Failures are returned in the body rather than as an error status.
pub async fn debug_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Diagnostics> {
    let diagnostics = tokio::task::spawn_blocking(move || state.service.diagnostics())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("diagnostics task failed: {}", e);
            Diagnostics::Failed {
                error: e.to_string(),
                trace: format!("{e:?}"),
                partial: Default::default(),
            }
        });
    Json(diagnostics)
}
