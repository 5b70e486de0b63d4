//! NAMASTE portal client

use crate::error::{Error, Result};
use crate::models::CodeEntry;
use crate::provider::TerminologyProvider;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const SERVICE: &str = "NAMASTE";

/// Client for the NAMASTE terminology portal.
///
/// The portal authenticates via an `X-API-Key` header and exposes a search
/// endpoint returning a JSON array of code/display pairs.
pub struct NamasteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NamasteClient {
    /// Create a new NAMASTE client with default settings.
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?query={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl TerminologyProvider for NamasteClient {
    async fn lookup(&self, query: &str) -> Result<Vec<CodeEntry>> {
        let url = self.search_url(query);
        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Upstream {
                service: SERVICE,
                status: response.status(),
            });
        }

        let entries: Vec<CodeEntry> = response.json().await?;
        tracing::debug!(query, results = entries.len(), "NAMASTE lookup complete");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        let client = NamasteClient::new(
            "https://namaste.example/api/".to_string(),
            "key".to_string(),
        )
        .unwrap();

        assert_eq!(
            client.search_url("jvara fever"),
            "https://namaste.example/api/search?query=jvara%20fever"
        );
    }

    #[test]
    fn parses_search_response() {
        let body = r#"[
            {"code": "AY-A01.0", "display": "Amavata"},
            {"code": "AY-B01.1", "display": "Jvara (Fever)"}
        ]"#;

        let entries: Vec<CodeEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "AY-A01.0");
        assert_eq!(entries[1].display, "Jvara (Fever)");
    }
}
