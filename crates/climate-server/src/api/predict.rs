//! Housing suitability scoring endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;

use climate_core::{PredictRequest, PredictResponse};

use crate::api::error::ApiError;
use crate::state::AppState;

/// Score a coordinate and, if risky, suggest the nearest safe zones.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let coordinate = req.coordinate();
    let errors = coordinate.validate();
    if !errors.is_empty() {
        return Err(ApiError::InvalidInput(errors));
    }

    let result = state.pipeline().score(coordinate, req.weights())?;
    tracing::info!(
        lat = coordinate.latitude,
        lon = coordinate.longitude,
        recommendation = ?result.recommendation,
        "Scored location"
    );

    Ok(Json(PredictResponse::from(result)))
}
