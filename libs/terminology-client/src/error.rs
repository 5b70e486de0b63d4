//! Error types for terminology-client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Terminology client errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Upstream {service} returned status {status}")]
    Upstream {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Unexpected response from {service}: {detail}")]
    UnexpectedResponse {
        service: &'static str,
        detail: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
