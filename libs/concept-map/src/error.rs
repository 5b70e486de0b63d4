//! Error types for concept-map

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Concept map loading errors
///
/// All variants are startup failures: the map is loaded once before the
/// server begins accepting requests, and a map that cannot be loaded must
/// prevent startup rather than surface as per-request errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read concept map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed concept map {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
