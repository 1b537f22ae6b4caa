//! Error responses.
//!
//! Every failure leaves the API as `{"error": <kind>, "message": <detail>}`.
//! Storage faults are logged here and replaced by a generic message.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::query::QueryError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error kind.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}

/// An error response ready to be sent.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.to_string(),
                message: message.into(),
            },
        }
    }

    /// 404 for paths under `/api` that no route handles.
    #[must_use]
    pub fn endpoint_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found", "API endpoint not found")
    }

    /// 405 for known paths requested with an unsupported method.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
            "Only GET is supported on this endpoint",
        )
    }

    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        let message = e.to_string();
        match e {
            QueryError::InvalidField(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid field", message)
            }
            QueryError::InvalidDateFormat { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid date format", message)
            }
            QueryError::MissingField => {
                Self::new(StatusCode::BAD_REQUEST, "Missing field", message)
            }
            QueryError::NoDataFound => Self::new(StatusCode::NOT_FOUND, "Not found", message),
            QueryError::Storage(cause) => {
                tracing::error!(error = %cause, "Measurement query failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "An unexpected error occurred",
                )
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid query string",
            rejection.body_text(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
