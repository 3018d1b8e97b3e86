//! Route definitions for the Product Insight API.

pub mod dashboard;
pub mod health;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

/// Assemble the application router with tracing, CORS and compression.
pub fn router(state: AppState) -> Router {
    let cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET]),
        Err(e) => {
            tracing::warn!(error = %e, url = %state.config.frontend_url, "Invalid FRONTEND_URL, CORS disabled");
            CorsLayer::new()
        }
    };

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/api/v1/dashboard", get(dashboard::view))
        .route("/api/v1/dashboard/stats/basic", get(dashboard::basic_stats))
        .route("/api/v1/dashboard/stats/users", get(dashboard::user_stats))
        .route("/api/v1/dashboard/charts", get(dashboard::charts))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
