//! Integration tests for the field catalogue.

use axum::http::StatusCode;
use serde_json::json;

use super::common::{get, test_app};

#[tokio::test]
async fn test_fields_lists_catalogue_with_units() {
    let (app, _state) = test_app();

    let (status, response) = get(app, "/api/fields").await;
    assert_eq!(status, StatusCode::OK);

    let fields = response["fields"].as_array().unwrap();
    let summary: Vec<_> = fields
        .iter()
        .map(|f| json!([f["name"], f["unit"]]))
        .collect();
    assert_eq!(
        summary,
        vec![
            json!(["temperature", "°C"]),
            json!(["humidity", "%"]),
            json!(["pressure", "hPa"]),
        ]
    );
    assert!(fields.iter().all(|f| f["description"].is_string()));
}
