//! Integration tests for `GET /api/measurements`.
//!
//! Tests cover:
//! - Full-record and single-field listings
//! - Inclusive date ranges and end-of-day normalization
//! - Validation failures and empty results

use axum::http::StatusCode;
use serde_json::{json, Value};
use shared::chrono::{TimeZone, Utc};
use shared::models::Observation;

use super::common::{get, get_raw, seeded_app, test_app};

fn timestamps(rows: &Value) -> Vec<String> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| r["timestamp"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_full_records_sorted() {
    let (app, _state) = seeded_app();

    let (status, response) = get(app, "/api/measurements").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        timestamps(&response),
        vec![
            "2025-01-01T00:00:00Z",
            "2025-01-02T00:00:00Z",
            "2025-01-03T00:00:00Z"
        ]
    );
    assert_eq!(
        response[2],
        json!({
            "timestamp": "2025-01-03T00:00:00Z",
            "temperature": 30.0,
            "humidity": 70.0,
            "pressure": 1030.0
        })
    );
}

#[tokio::test]
async fn test_list_single_field_single_day() {
    let (app, _state) = seeded_app();

    let (status, response) = get(
        app,
        "/api/measurements?field=humidity&start_date=2025-01-02&end_date=2025-01-02",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!([{"timestamp": "2025-01-02T00:00:00Z", "humidity": 60.0}])
    );
}

#[tokio::test]
async fn test_every_field_projection_is_sorted() {
    let (app, state) = test_app();
    for hour in [23, 0, 12, 6, 18] {
        state
            .store()
            .insert(Observation::new(
                Utc.with_ymd_and_hms(2025, 4, 1, hour, 0, 0).unwrap(),
                f64::from(hour),
                50.0,
                1000.0,
            ))
            .unwrap();
    }

    for field in ["temperature", "humidity", "pressure"] {
        let (status, response) =
            get(app.clone(), &format!("/api/measurements?field={field}")).await;
        assert_eq!(status, StatusCode::OK);

        let rows = response.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.as_object().unwrap().len() == 2));
        assert!(rows.iter().all(|r| r.get(field).is_some()));

        let ts = timestamps(&response);
        let mut sorted = ts.clone();
        sorted.sort();
        assert_eq!(ts, sorted);
    }
}

#[tokio::test]
async fn test_end_date_includes_whole_day() {
    let (app, state) = test_app();
    state
        .store()
        .insert(Observation::new(
            Utc.with_ymd_and_hms(2025, 1, 5, 23, 59, 59).unwrap(),
            1.0,
            2.0,
            3.0,
        ))
        .unwrap();
    state
        .store()
        .insert(Observation::new(
            Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap(),
            4.0,
            5.0,
            6.0,
        ))
        .unwrap();

    let (status, response) = get(app, "/api/measurements?end_date=2025-01-05").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(timestamps(&response), vec!["2025-01-05T23:59:59Z"]);
}

#[tokio::test]
async fn test_open_ended_ranges() {
    let (app, _state) = seeded_app();

    let (_, response) = get(app.clone(), "/api/measurements?start_date=2025-01-02").await;
    assert_eq!(response.as_array().unwrap().len(), 2);

    let (_, response) = get(app, "/api/measurements?end_date=2025-01-01").await;
    assert_eq!(response.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_inverted_range_is_not_found() {
    let (app, _state) = seeded_app();

    let (status, response) = get(
        app,
        "/api/measurements?start_date=2025-01-03&end_date=2025-01-01",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "Not found");
}

#[tokio::test]
async fn test_invalid_month_is_bad_request() {
    let (app, _state) = seeded_app();

    let (status, response) = get(app, "/api/measurements?start_date=2025-13-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Invalid date format");
    assert_eq!(
        response["message"],
        "Invalid start_date format. Use YYYY-MM-DD"
    );
}

#[tokio::test]
async fn test_invalid_end_date_names_end_date() {
    let (app, _state) = seeded_app();

    let (status, response) = get(app, "/api/measurements?end_date=01-02-2025").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Invalid end_date format. Use YYYY-MM-DD");
}

#[tokio::test]
async fn test_invalid_field_lists_valid_fields() {
    let (app, _state) = seeded_app();

    let (status, response) = get(app, "/api/measurements?field=rainfall").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Invalid field");
    let message = response["message"].as_str().unwrap();
    assert!(message.contains("temperature, humidity, pressure"));
}

#[tokio::test]
async fn test_empty_store_is_not_found() {
    let (app, _state) = test_app();

    let (status, response) = get(app, "/api/measurements?field=pressure").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        response,
        json!({
            "error": "Not found",
            "message": "No measurements found for the specified criteria"
        })
    );
}

#[tokio::test]
async fn test_repeated_queries_are_byte_identical() {
    let (app, _state) = seeded_app();
    let uri = "/api/measurements?field=temperature&start_date=2025-01-01";

    let (_, first) = get_raw(app.clone(), uri).await;
    let (_, second) = get_raw(app, uri).await;
    assert_eq!(first, second);
}
