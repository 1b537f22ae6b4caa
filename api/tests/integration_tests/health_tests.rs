//! Integration tests for health check and general API behavior.
//!
//! Tests cover:
//! - Health check endpoint
//! - Unknown API paths
//! - Unsupported methods on known API paths

use axum::http::StatusCode;
use serde_json::json;

use super::common::{get, send, seeded_app, test_app};

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = seeded_app();

    let (status, response) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["service"], "skylog-api");
    assert_eq!(response["observations"], 3);
}

#[tokio::test]
async fn test_unknown_api_endpoints() {
    let (app, _state) = test_app();

    for uri in ["/api", "/api/stations", "/api/v1/measurements"] {
        let (status, response) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(
            response,
            json!({"error": "Not found", "message": "API endpoint not found"})
        );
    }
}

#[tokio::test]
async fn test_non_api_paths_without_static_dir() {
    let (app, _state) = test_app();

    let (status, _) = get(app, "/index.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_methods_return_json_errors() {
    let (app, _state) = seeded_app();

    for (method, uri) in [
        ("POST", "/api/measurements"),
        ("PUT", "/api/measurements/metrics?field=temperature"),
        ("DELETE", "/api/fields"),
    ] {
        let (status, response) = send(app.clone(), method, uri).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(response["error"], "Method not allowed");
        assert!(response["message"].is_string());
    }
}
