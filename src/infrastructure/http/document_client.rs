//! HTTP adapter for fetching index documents.

use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use tracing::trace;

use crate::domain::errors::DocumentError;
use crate::domain::ports::DocumentPort;

/// Fetches JSON documents over HTTP with caching disabled.
///
/// Index documents are republished in place, so every fetch asks
/// intermediaries for a fresh copy.
#[derive(Debug, Clone)]
pub struct HttpDocumentClient {
    client: reqwest::Client,
}

impl HttpDocumentClient {
    /// Creates a client with the given request timeout.
    ///
    /// # Errors
    /// Returns `DocumentError` if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, DocumentError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(DocumentError::network)?;

        Ok(Self { client })
    }

    /// Wraps an already-built client, sharing its connection pool.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DocumentPort for HttpDocumentClient {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, DocumentError> {
        trace!(url = %url, "Fetching index document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(DocumentError::network)?;

        if !response.status().is_success() {
            return Err(DocumentError::Status(response.status().as_u16()));
        }

        let bytes = response.bytes().await.map_err(DocumentError::network)?;

        serde_json::from_slice(&bytes).map_err(DocumentError::malformed)
    }
}
