//! Suggestion matching
//!
//! The cross-reference join at the heart of the service: NAMASTE search
//! results are joined against the curated concept map to produce dual-coded
//! suggestions. This is a pure function over in-memory data; a NAMASTE code
//! with no curated mapping simply produces nothing, which is a normal
//! outcome rather than an error.

use serde::{Deserialize, Serialize};
use setu_concept_map::ConceptMap;
use setu_terminology::CodeEntry;

/// A dual-coded suggestion: one NAMASTE search hit paired with its curated
/// ICD-11 equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Deterministic identifier, `{namaste_code}-{icd11_code}`.
    pub suggestion_id: String,
    /// The NAMASTE hit exactly as the provider returned it.
    pub namaste_diagnosis: CodeEntry,
    /// ICD-11 code and display taken from the concept map record, not from
    /// a live ICD-11 lookup. The curated display is the canonical one.
    pub icd11_diagnosis: CodeEntry,
    /// Curated strength-of-match scalar, passed through untouched.
    pub confidence: f64,
}

/// Join NAMASTE results against the concept map.
///
/// Iterates the results in provider order and pairs each entry with the
/// FIRST map record (in table order) whose `namaste_code` matches. At most
/// one suggestion is produced per input entry, even when the table carries
/// several rows for the same code; entries without a curated mapping are
/// skipped silently. Output order is the input order of the matched entries.
pub fn match_codes(namaste_results: &[CodeEntry], map: &ConceptMap) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for entry in namaste_results {
        if let Some(record) = map.find_first(&entry.code) {
            suggestions.push(Suggestion {
                suggestion_id: format!("{}-{}", entry.code, record.icd11_code),
                namaste_diagnosis: entry.clone(),
                icd11_diagnosis: CodeEntry::new(
                    record.icd11_code.clone(),
                    record.display.icd11.clone(),
                ),
                confidence: record.confidence,
            });
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use setu_concept_map::{DisplayPair, MappingRecord};

    fn record(namaste: &str, icd11: &str, icd11_display: &str, confidence: f64) -> MappingRecord {
        MappingRecord {
            namaste_code: namaste.to_string(),
            icd11_code: icd11.to_string(),
            confidence,
            display: DisplayPair {
                namaste: format!("{namaste} (namaste)"),
                icd11: icd11_display.to_string(),
            },
        }
    }

    fn amavata_map() -> ConceptMap {
        ConceptMap::from_records(vec![record(
            "AY-A01.0",
            "MG00.1",
            "Rheumatoid arthritis",
            0.9,
        )])
    }

    #[test]
    fn matched_entry_yields_one_enriched_suggestion() {
        let results = vec![CodeEntry::new("AY-A01.0", "Amavata")];

        let suggestions = match_codes(&results, &amavata_map());

        assert_eq!(suggestions.len(), 1);
        let suggestion = &suggestions[0];
        assert_eq!(suggestion.suggestion_id, "AY-A01.0-MG00.1");
        assert_eq!(suggestion.namaste_diagnosis, results[0]);
        assert_eq!(suggestion.icd11_diagnosis.code, "MG00.1");
        assert_eq!(suggestion.icd11_diagnosis.display, "Rheumatoid arthritis");
        assert_eq!(suggestion.confidence, 0.9);
    }

    #[test]
    fn empty_results_yield_empty_output() {
        assert!(match_codes(&[], &amavata_map()).is_empty());
    }

    #[test]
    fn unmapped_code_yields_nothing() {
        let results = vec![CodeEntry::new("AY-Z99.9", "Unknown condition")];
        assert!(match_codes(&results, &amavata_map()).is_empty());
    }

    #[test]
    fn output_never_exceeds_input_size() {
        let map = ConceptMap::from_records(vec![
            record("AY-A01.0", "MG00.1", "Rheumatoid arthritis", 0.95),
            // Second row for the same code must not add a second suggestion.
            record("AY-A01.0", "MG00.9", "Arthritis, unspecified", 0.40),
            record("AY-B01.1", "MG10.0", "Fever of unknown origin", 0.90),
        ]);
        let results = vec![
            CodeEntry::new("AY-A01.0", "Amavata"),
            CodeEntry::new("AY-B01.1", "Jvara (Fever)"),
            CodeEntry::new("AY-Z99.9", "Unknown"),
        ];

        let suggestions = match_codes(&results, &map);
        assert!(suggestions.len() <= results.len());
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn first_map_record_wins_for_duplicate_codes() {
        let map = ConceptMap::from_records(vec![
            record("AY-A01.0", "MG00.1", "Rheumatoid arthritis", 0.95),
            record("AY-A01.0", "MG00.9", "Arthritis, unspecified", 0.99),
        ]);
        let results = vec![CodeEntry::new("AY-A01.0", "Amavata")];

        let suggestions = match_codes(&results, &map);
        assert_eq!(suggestions.len(), 1);
        // Table order decides, not confidence.
        assert_eq!(suggestions[0].suggestion_id, "AY-A01.0-MG00.1");
    }

    #[test]
    fn output_preserves_input_order() {
        let map = ConceptMap::from_records(vec![
            record("AY-B01.1", "MG10.0", "Fever of unknown origin", 0.90),
            record("AY-A01.0", "MG00.1", "Rheumatoid arthritis", 0.95),
        ]);
        let results = vec![
            CodeEntry::new("AY-A01.0", "Amavata"),
            CodeEntry::new("AY-C02.3", "Unmapped"),
            CodeEntry::new("AY-B01.1", "Jvara (Fever)"),
        ];

        let suggestions = match_codes(&results, &map);
        let ids: Vec<&str> = suggestions
            .iter()
            .map(|s| s.suggestion_id.as_str())
            .collect();
        // Input order of the matched entries, not table order.
        assert_eq!(ids, vec!["AY-A01.0-MG00.1", "AY-B01.1-MG10.0"]);
    }

    #[test]
    fn matching_is_idempotent() {
        let map = ConceptMap::from_records(vec![
            record("AY-A01.0", "MG00.1", "Rheumatoid arthritis", 0.95),
            record("AY-B01.1", "MG10.0", "Fever of unknown origin", 0.90),
        ]);
        let results = vec![
            CodeEntry::new("AY-A01.0", "Amavata"),
            CodeEntry::new("AY-B01.1", "Jvara (Fever)"),
        ];

        let first = match_codes(&results, &map);
        let second = match_codes(&results, &map);
        assert_eq!(first, second);
    }

    #[test]
    fn suggestion_serializes_wire_field_names() {
        let suggestions = match_codes(&[CodeEntry::new("AY-A01.0", "Amavata")], &amavata_map());

        let json = serde_json::to_value(&suggestions).unwrap();
        assert_eq!(json[0]["suggestion_id"], "AY-A01.0-MG00.1");
        assert_eq!(json[0]["namaste_diagnosis"]["display"], "Amavata");
        assert_eq!(json[0]["icd11_diagnosis"]["code"], "MG00.1");
        assert_eq!(json[0]["confidence"], 0.9);
    }
}
