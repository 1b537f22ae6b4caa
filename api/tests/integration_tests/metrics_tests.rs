//! Integration tests for `GET /api/measurements/metrics`.
//!
//! Tests cover:
//! - Summary statistics per field
//! - Date-range filtering
//! - Required and invalid `field` parameter
//! - Rounding and ordering properties

use axum::http::StatusCode;
use serde_json::{json, Value};
use shared::chrono::{Duration, TimeZone, Utc};
use shared::models::Observation;

use super::common::{get, seeded_app, test_app};

fn has_two_decimals(value: &Value) -> bool {
    let v = value.as_f64().unwrap();
    ((v * 100.0).round() - v * 100.0).abs() < 1e-6
}

#[tokio::test]
async fn test_temperature_metrics() {
    let (app, _state) = seeded_app();

    let (status, response) = get(app, "/api/measurements/metrics?field=temperature").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({
            "field": "temperature",
            "count": 3,
            "avg": 20.0,
            "min": 10.0,
            "max": 30.0,
            "stdDev": 8.16
        })
    );
}

#[tokio::test]
async fn test_metrics_with_date_range() {
    let (app, _state) = seeded_app();

    let (status, response) = get(
        app,
        "/api/measurements/metrics?field=pressure&start_date=2025-01-02&end_date=2025-01-03",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 2);
    assert_eq!(response["avg"], 1025.0);
    assert_eq!(response["min"], 1020.0);
    assert_eq!(response["max"], 1030.0);
    assert_eq!(response["stdDev"], 5.0);
}

#[tokio::test]
async fn test_single_value_has_zero_std_dev() {
    let (app, _state) = seeded_app();

    let (status, response) = get(
        app,
        "/api/measurements/metrics?field=humidity&start_date=2025-01-02&end_date=2025-01-02",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], 1);
    assert_eq!(response["avg"], 60.0);
    assert_eq!(response["min"], 60.0);
    assert_eq!(response["max"], 60.0);
    assert_eq!(response["stdDev"], 0.0);
}

#[tokio::test]
async fn test_metrics_are_rounded_and_ordered() {
    let (app, state) = test_app();
    let start = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
    let readings = [21.337, 19.052, 24.918, 22.471, 18.806, 23.129, 20.663];
    for (i, temp) in readings.iter().enumerate() {
        state
            .store()
            .insert(Observation::new(
                start + Duration::hours(i64::try_from(i).unwrap() * 3),
                *temp,
                55.4,
                1011.2,
            ))
            .unwrap();
    }

    for field in ["temperature", "humidity", "pressure"] {
        let (status, response) = get(
            app.clone(),
            &format!("/api/measurements/metrics?field={field}"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        for key in ["avg", "min", "max", "stdDev"] {
            assert!(
                has_two_decimals(&response[key]),
                "{field}.{key} = {}",
                response[key]
            );
        }

        let min = response["min"].as_f64().unwrap();
        let avg = response["avg"].as_f64().unwrap();
        let max = response["max"].as_f64().unwrap();
        assert!(min <= avg && avg <= max);
        assert!(response["stdDev"].as_f64().unwrap() >= 0.0);
    }
}

#[tokio::test]
async fn test_missing_field() {
    let (app, _state) = seeded_app();

    let (status, response) = get(app, "/api/measurements/metrics?start_date=2025-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Missing field");
}

#[tokio::test]
async fn test_invalid_field() {
    let (app, _state) = seeded_app();

    let (status, response) = get(app, "/api/measurements/metrics?field=uv_index").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Invalid field");
}

#[tokio::test]
async fn test_invalid_date() {
    let (app, _state) = seeded_app();

    let (status, response) = get(
        app,
        "/api/measurements/metrics?field=temperature&start_date=2025-02-30",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Invalid date format");
}

#[tokio::test]
async fn test_inverted_range_is_not_found() {
    let (app, _state) = seeded_app();

    let (status, response) = get(
        app,
        "/api/measurements/metrics?field=temperature&start_date=2025-01-03&end_date=2025-01-02",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        response["message"],
        "No measurements found for the specified criteria"
    );
}

#[tokio::test]
async fn test_empty_store_is_not_found() {
    let (app, _state) = test_app();

    let (status, response) = get(app, "/api/measurements/metrics?field=humidity").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "Not found");
}
