//! Unified error handling with consistent API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }
}

/// Failures of the statistics calculators.
///
/// Computations are deterministic, so neither kind is ever worth retrying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// One or both input tables are absent; nothing was computed.
    #[error("Input data unavailable: {0}")]
    MissingInput(String),

    /// A maximum or minimum was requested over an empty group.
    #[error("Cannot compute {0}: no rows to aggregate")]
    Aggregation(&'static str),
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Stats(e @ StatsError::MissingInput(_)) => {
                tracing::warn!(error = %e, "Dashboard data unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "MISSING_INPUT", e.to_string())
            }
            AppError::Stats(e @ StatsError::Aggregation(_)) => {
                tracing::warn!(error = %e, "Statistics aggregation failed");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "AGGREGATION_ERROR",
                    e.to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message,
            }),
        };

        (status, Json(body)).into_response()
    }
}
