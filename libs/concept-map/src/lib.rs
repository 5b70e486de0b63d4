//! Local NAMASTE ↔ ICD-11 concept map
//!
//! Holds the curated equivalence table linking NAMASTE traditional-medicine
//! codes to ICD-11 classification codes. The table is loaded once from a
//! static JSON artifact at process start and is read-only afterwards, so it
//! can be shared across concurrent requests without locking.
//!
//! # Examples
//!
//! ```rust,no_run
//! use setu_concept_map::ConceptMap;
//!
//! # fn example() -> setu_concept_map::Result<()> {
//! let map = ConceptMap::from_path("mapping.json")?;
//! if let Some(record) = map.find_first("AY-A01.0") {
//!     println!("{} maps to {}", record.namaste_code, record.icd11_code);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod models;

pub use error::{Error, Result};
pub use models::{DisplayPair, MappingRecord};

use std::path::Path;

/// The in-memory concept map: an ordered, immutable sequence of
/// [`MappingRecord`] entries, in the order they appear in the source table.
#[derive(Debug, Clone)]
pub struct ConceptMap {
    records: Vec<MappingRecord>,
}

impl ConceptMap {
    /// Load the concept map from a JSON file containing an array of records.
    ///
    /// A missing or malformed file is fatal: callers are expected to treat
    /// this as a startup precondition and refuse to serve without the map.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<MappingRecord> =
            serde_json::from_str(&contents).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Concept map loaded"
        );

        Ok(Self { records })
    }

    /// Build a concept map from records already in memory.
    pub fn from_records(records: Vec<MappingRecord>) -> Self {
        Self { records }
    }

    /// Find the first record (in table order) whose `namaste_code` equals
    /// `code`.
    ///
    /// The table may legitimately contain several rows for one NAMASTE code;
    /// the first row in table order wins, and callers relying on that
    /// tie-break must not reorder the source table. Returns `None` when the
    /// code has no curated mapping, which is a normal outcome rather than an
    /// error.
    pub fn find_first(&self, code: &str) -> Option<&MappingRecord> {
        self.records.iter().find(|record| record.namaste_code == code)
    }

    /// Read-only view of all records in table order.
    pub fn records(&self) -> &[MappingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
