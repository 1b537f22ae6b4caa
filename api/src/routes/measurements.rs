//! Measurement query endpoints.
//!
//! - `GET /api/measurements` lists observations, optionally projected to one field.
//! - `GET /api/measurements/metrics` summarizes one field over a date range.

use super::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use shared::models::MeasurementView;
use shared::query::{compute_metrics, list_measurements, FilterParams};
use shared::stats::MetricsResult;

/// Creates the measurement routes.
pub fn measurement_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/measurements", get(list_handler))
        .route("/api/measurements/metrics", get(metrics_handler))
        .with_state(state)
}

async fn list_handler(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<Vec<MeasurementView>>, ApiError> {
    let Query(params) = params?;

    let rows = list_measurements(state.store(), &params).map_err(|e| {
        tracing::debug!(?params, error = %e, "List query rejected");
        ApiError::from(e)
    })?;

    Ok(Json(rows))
}

async fn metrics_handler(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<MetricsResult>, ApiError> {
    let Query(params) = params?;

    let metrics = compute_metrics(state.store(), &params).map_err(|e| {
        tracing::debug!(?params, error = %e, "Metrics query rejected");
        ApiError::from(e)
    })?;

    Ok(Json(metrics))
}
