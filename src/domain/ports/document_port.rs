//! Port definition for fetching remote index documents.

use crate::domain::errors::DocumentError;

/// Port for retrieving JSON documents that describe the collection.
///
/// Implementations must perform anonymous, no-cache GETs; the loaders rely
/// on always seeing the published document, never a stale intermediary copy.
#[async_trait::async_trait]
pub trait DocumentPort: Send + Sync {
    /// Fetches and parses one JSON document.
    ///
    /// # Errors
    /// Returns `DocumentError` when the request fails, the status is not a
    /// success, or the body is not valid JSON.
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, DocumentError>;
}
