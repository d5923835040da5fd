//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
///
/// Every request-terminal failure maps onto this taxonomy; internal
/// detail is logged via tracing before the opaque variants are returned.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No valid session on an authenticated route
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed or out-of-enum payload, with field-level detail
    #[error("Validation failed on {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The requested row does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] common::error::StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Unauthorized"}),
            ),
            ApiError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({"error": message, "field": field}),
            ),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({"error": format!("{what} not found")}),
            ),
            ApiError::Store(common::error::StoreError::Conflict(message)) => {
                (StatusCode::BAD_REQUEST, json!({"error": message}))
            }
            ApiError::InternalServerError | ApiError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error"}),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
