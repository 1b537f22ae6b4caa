//! API route definitions.
//!
//! This module organizes all HTTP routes for the Skylog API server.

mod error;
mod fields;
mod health;
mod measurements;

pub use error::{ApiError, ErrorBody};
pub use fields::field_routes;
pub use health::health_routes;
pub use measurements::measurement_routes;

/// Fallback for `/api/*` paths without a route.
pub async fn api_not_found() -> ApiError {
    ApiError::endpoint_not_found()
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
