//! Health check endpoint.
//!
//! Reports liveness together with whether the observation store answers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` when the store answers, `unhealthy` otherwise.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Number of stored observations, if the store answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<usize>,
}

/// Creates the health check routes.
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, code, observations) = match state.store().count() {
        Ok(count) => ("healthy", StatusCode::OK, Some(count)),
        Err(e) => {
            tracing::warn!(error = %e, "Observation store unavailable");
            ("unhealthy", StatusCode::SERVICE_UNAVAILABLE, None)
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            service: "skylog-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            observations,
        }),
    )
}
