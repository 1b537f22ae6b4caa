//! Field catalogue endpoint.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use shared::models::{field_catalogue, FieldInfo};

/// Response for `GET /api/fields`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldsResponse {
    /// Every queryable field with its unit and description.
    pub fields: Vec<FieldInfo>,
}

/// Creates the field catalogue routes.
pub fn field_routes() -> Router {
    Router::new().route("/api/fields", get(list_fields))
}

async fn list_fields() -> Json<FieldsResponse> {
    Json(FieldsResponse {
        fields: field_catalogue(),
    })
}
