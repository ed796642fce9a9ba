//! HTTP error responses
//!
//! Every failure leaves the server as `{"error": "..."}`. Validation and
//! not-found messages go out verbatim; dataset failures are logged in full
//! and replaced by the route's generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geodb_core::{BuildError, QueryError};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Client input rejected by the query layer (400 / 404).
    Query(QueryError),
    /// The dataset could not be built (500). Carries the generic message.
    Unavailable(&'static str),
    /// The path parameter could not be extracted at all (400).
    BadPath,
    /// No route matched (404).
    NoRoute,
}

impl ApiError {
    /// Logs the build failure and keeps only `message` for the caller.
    pub fn unavailable(message: &'static str, source: BuildError) -> Self {
        error!(error = %source, "{message}");
        ApiError::Unavailable(message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Query(QueryError::InvalidArgument(_)) | ApiError::BadPath => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Query(QueryError::NotFound(_)) | ApiError::NoRoute => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Query(err) => err.to_string(),
            ApiError::Unavailable(message) => (*message).to_string(),
            ApiError::BadPath => "Invalid path parameter".to_string(),
            ApiError::NoRoute => "Not found".to_string(),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Query(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
