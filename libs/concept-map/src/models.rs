//! Concept map record model

use serde::{Deserialize, Serialize};

/// One curated equivalence between a NAMASTE code and an ICD-11 code.
///
/// The shape matches the `mapping.json` source table. `confidence` is an
/// opaque strength-of-match scalar maintained by the curators; it is carried
/// through to suggestions untouched and never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub namaste_code: String,
    pub icd11_code: String,
    pub confidence: f64,
    pub display: DisplayPair,
}

/// Canonical display text for both sides of a mapping.
///
/// The ICD-11 display stored here is the curated label, which may differ
/// from what a live ICD-11 lookup would return for the same code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayPair {
    pub namaste: String,
    pub icd11: String,
}
