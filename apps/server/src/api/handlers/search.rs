//! Dual-coding search handler
//!
//! `GET /api/search-codes?q=...` looks the query up in both terminology
//! services, joins the NAMASTE hits against the curated concept map, and
//! returns the resulting suggestions as a JSON array.

use crate::{
    services::matching::{self, Suggestion},
    state::AppState,
    Error, Result,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use setu_terminology::{CodeEntry, TerminologyProvider};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

pub async fn search_codes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Suggestion>>> {
    // Validate before any outbound call is made.
    let query = params.q.as_deref().map(str::trim).unwrap_or("");
    if query.is_empty() {
        return Err(Error::missing_query());
    }

    // The lookups are independent, so issue them concurrently. Matching runs
    // over the NAMASTE hits and the curated map only; the live ICD-11 results
    // are fetched but currently unused, since the map record carries the
    // canonical ICD-11 code and display for each suggestion.
    // TODO: also return the raw unmatched entries from both providers so
    // clients can surface codes that have no curated mapping yet.
    let (_icd11_results, namaste_results) = tokio::join!(
        lookup_or_empty(state.icd11(), query, "ICD-11"),
        lookup_or_empty(state.namaste(), query, "NAMASTE"),
    );

    let suggestions = matching::match_codes(&namaste_results, state.concept_map());

    tracing::debug!(
        query,
        namaste_hits = namaste_results.len(),
        suggestions = suggestions.len(),
        "Search complete"
    );

    Ok(Json(suggestions))
}

/// Run one provider lookup, degrading a failure to an empty result set.
///
/// A terminology service being down must not fail the whole search; the
/// other side and the concept map can still produce a useful answer.
async fn lookup_or_empty(
    provider: &dyn TerminologyProvider,
    query: &str,
    service: &'static str,
) -> Vec<CodeEntry> {
    match provider.lookup(query).await {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(service, %error, "Terminology lookup failed, treating as empty");
            Vec::new()
        }
    }
}
