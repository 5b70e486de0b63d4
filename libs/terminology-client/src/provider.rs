//! Terminology provider trait

use crate::error::Result;
use crate::models::CodeEntry;
use async_trait::async_trait;

/// A code-system lookup service.
///
/// Implementations map a free-text query to zero or more code/display pairs
/// for their coding system, in the order the upstream service returned them.
/// An empty result set is a normal outcome, not an error.
#[async_trait]
pub trait TerminologyProvider: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Vec<CodeEntry>>;
}
