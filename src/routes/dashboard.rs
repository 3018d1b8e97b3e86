//! Dashboard routes: the full page view and the individual statistics.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::services::basic_stats::BasicStats;
use crate::services::dashboard::{self, ChartSection, DashboardView};
use crate::services::user_stats::UserStats;
use crate::AppState;

/// GET /api/v1/dashboard — previews, statistics, highlights and chart gallery.
pub async fn view(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let view = dashboard::build_view(state.dataset.as_deref(), &state.stats, &state.config)?;
    Ok(ApiResponse::success(view))
}

/// GET /api/v1/dashboard/stats/basic — corpus-level counts.
pub async fn basic_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BasicStats>>, AppError> {
    let dataset = dashboard::require_dataset(state.dataset.as_deref())?;
    Ok(ApiResponse::success(state.stats.basic_stats(dataset)))
}

/// GET /api/v1/dashboard/stats/users — top reviewers, spenders and products.
pub async fn user_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserStats>>, AppError> {
    let dataset = dashboard::require_dataset(state.dataset.as_deref())?;
    let stats = state.stats.user_stats(dataset)?;
    Ok(ApiResponse::success(stats))
}

/// GET /api/v1/dashboard/charts — the static chart gallery.
pub async fn charts(State(state): State<AppState>) -> Json<ApiResponse<Vec<ChartSection>>> {
    ApiResponse::success(dashboard::chart_sections(&state.config.assets_dir))
}
