//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::models::dataset::DatasetSummary;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub dataset: Option<DatasetSummary>,
    pub cached_stats: usize,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — reports whether the input tables are loaded.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let dataset = state.dataset.as_deref().map(|d| d.summary());
    let status = if dataset.is_some() { "ok" } else { "degraded" };
    if dataset.is_none() {
        tracing::warn!("Readiness check: dataset not loaded");
    }

    ApiResponse::success(HealthStatus {
        status: status.to_string(),
        dataset,
        cached_stats: state.stats.entry_count(),
    })
}
