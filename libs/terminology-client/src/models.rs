//! Shared wire models

use serde::{Deserialize, Serialize};

/// A single coding-system result: an opaque code plus its human-readable
/// label. Produced fresh per lookup and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub display: String,
}

impl CodeEntry {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
        }
    }
}
