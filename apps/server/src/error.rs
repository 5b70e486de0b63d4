//! Error types for the bridge server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Client-facing message, surfaced verbatim in the error payload.
    #[error("{0}")]
    Validation(String),

    #[error("Terminology service error: {0}")]
    Terminology(#[from] setu_terminology::Error),

    #[error("EMR submission failed: {0}")]
    EmrSubmission(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Terminology(_) | Error::EmrSubmission(_) => {
                tracing::error!("Upstream error: {}", self);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            Error::Internal(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        // All error payloads share the `{"error": "..."}` shape clients
        // already depend on.
        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}

impl Error {
    /// The message the search endpoint emits for a missing/empty `q`.
    pub fn missing_query() -> Self {
        Error::Validation("Query parameter 'q' is required".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_bad_request() {
        let response = Error::missing_query().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let err = Error::Internal("connection pool exhausted".to_string());
        let display = err.to_string();
        assert!(display.contains("connection pool exhausted"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
