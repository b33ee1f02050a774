//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.
//!
//! The response body shape is `{"error": "<message>"}`. Validation errors
//! carry their specific message; store failures surface as a generic
//! "Server error" with the detail kept in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::query::QueryError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Query validation or execution error
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Query(QueryError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Query(e @ (QueryError::NoData | QueryError::NoValues)) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            // Internal detail is logged, never returned to the client
            ApiError::Query(QueryError::Store(_)) | ApiError::Internal(_) | ApiError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        if status.is_server_error() {
            let request_id = uuid::Uuid::new_v4().to_string();
            tracing::error!(
                request_id = %request_id,
                error = %self,
                "API request failed"
            );
        } else {
            tracing::debug!(status = %status, error = %self, "API request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
