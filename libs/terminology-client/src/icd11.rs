//! WHO ICD-11 API client
//!
//! The ICD-11 API uses OAuth 2.0 client-credentials: a short-lived bearer
//! token is fetched from the token endpoint and attached to every search
//! request. The token is cached until shortly before expiry so concurrent
//! lookups share one credential.

use crate::error::{Error, Result};
use crate::models::CodeEntry;
use crate::provider::TerminologyProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

const SERVICE: &str = "ICD-11";

/// Refresh the token this long before its reported expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

pub struct Icd11Client {
    client: Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Search response envelope. The API nests hits under `destinationEntities`;
/// each hit carries the code as `theCode` and the label as `title`.
#[derive(Deserialize)]
struct SearchResponse {
    #[serde(rename = "destinationEntities", default)]
    destination_entities: Vec<DestinationEntity>,
}

#[derive(Deserialize)]
struct DestinationEntity {
    #[serde(rename = "theCode")]
    the_code: String,
    title: String,
}

impl Icd11Client {
    /// Create a new ICD-11 client with default settings.
    pub fn new(
        base_url: String,
        token_url: String,
        client_id: String,
        client_secret: String,
    ) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url,
            token_url,
            client_id,
            client_secret,
            token: Mutex::new(None),
        })
    }

    /// Get a valid bearer token, fetching a fresh one when the cached token
    /// is absent or about to expire.
    async fn bearer_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", "icdapi_access"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Auth(format!(
                "token endpoint returned status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in)
            .saturating_sub(TOKEN_EXPIRY_MARGIN)
            .max(Duration::from_secs(1));

        tracing::debug!(expires_in = token.expires_in, "ICD-11 token refreshed");

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + lifetime,
        });
        Ok(access_token)
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?q={}&useFlexisearch=true",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl TerminologyProvider for Icd11Client {
    async fn lookup(&self, query: &str) -> Result<Vec<CodeEntry>> {
        let token = self.bearer_token().await?;
        let url = self.search_url(query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("Accept-Language", "en")
            .header("API-Version", "v2")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Upstream {
                service: SERVICE,
                status: response.status(),
            });
        }

        let body: SearchResponse = response.json().await?;
        let entries = body
            .destination_entities
            .into_iter()
            .map(|entity| CodeEntry {
                code: entity.the_code,
                display: entity.title,
            })
            .collect::<Vec<_>>();

        tracing::debug!(query, results = entries.len(), "ICD-11 lookup complete");
        Ok(entries)
    }
}
