//! Common test utilities and helpers for integration tests.
//!
//! Provides test app setup, a seeded observation set and request helpers.

use api::{create_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use shared::chrono::{TimeZone, Utc};
use shared::models::Observation;

/// Creates a test router with a fresh in-memory store.
pub fn test_app() -> (Router, AppState) {
    let state = AppState::with_in_memory_store();
    let router = create_router(state.clone());
    (router, state)
}

/// Creates a test router whose store holds three daily observations:
///
/// | day        | temperature | humidity | pressure |
/// |------------|-------------|----------|----------|
/// | 2025-01-01 | 10          | 50       | 1010     |
/// | 2025-01-02 | 20          | 60       | 1020     |
/// | 2025-01-03 | 30          | 70       | 1030     |
pub fn seeded_app() -> (Router, AppState) {
    let (router, state) = test_app();
    for (day, temp) in [(1, 10.0), (2, 20.0), (3, 30.0)] {
        state
            .store()
            .insert(Observation::new(
                Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
                temp,
                40.0 + temp,
                1000.0 + temp,
            ))
            .unwrap();
    }
    (router, state)
}

/// Sends a bodiless request, returning status and the parsed JSON body.
pub async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send_raw(app, method, uri).await;
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn send_raw(app: Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, body_bytes.to_vec())
}

/// Makes a GET request, returning status and raw body bytes.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send_raw(app, "GET", uri).await
}

/// Makes a GET request, returning status and the parsed JSON body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri).await
}
