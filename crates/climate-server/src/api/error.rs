//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use climate_core::ScoringError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Coordinate outside the valid lat/lon ranges
    InvalidInput(Vec<String>),
    /// Pipeline failure (classifier error)
    Scoring(ScoringError),
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        Self::Scoring(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidInput(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid coordinate",
                    "details": details,
                })),
            )
                .into_response(),
            Self::Scoring(err) => {
                tracing::error!("Scoring failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
