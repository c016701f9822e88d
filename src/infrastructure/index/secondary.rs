//! Lazy-once loader for the secondary identifier→URL index.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::ports::DocumentPort;

/// Loads the flat identifier→URL index published alongside the images.
///
/// Attempted at most once per process lifetime regardless of outcome; a
/// fetch failure, non-success response, or unusable shape yields a
/// permanent `None`. Absence of this document is expected for many
/// collections and is not an error.
pub struct SecondaryIndexLoader {
    url: String,
    documents: Arc<dyn DocumentPort>,
    index: OnceCell<Option<HashMap<String, String>>>,
}

impl SecondaryIndexLoader {
    /// Creates a loader for the index at `url`.
    #[must_use]
    pub fn new(url: String, documents: Arc<dyn DocumentPort>) -> Self {
        Self {
            url,
            documents,
            index: OnceCell::new(),
        }
    }

    /// Returns the index, attempting the single fetch on first demand.
    pub async fn ensure(&self) -> Option<&HashMap<String, String>> {
        self.index.get_or_init(|| self.build()).await.as_ref()
    }

    async fn build(&self) -> Option<HashMap<String, String>> {
        let doc = match self.documents.fetch_json(&self.url).await {
            Ok(doc) => doc,
            Err(e) => {
                debug!(url = %self.url, error = %e, "Secondary index unavailable");
                return None;
            }
        };

        let Value::Object(entries) = doc else {
            debug!(url = %self.url, "Secondary index has unexpected shape");
            return None;
        };

        let map: HashMap<String, String> = entries
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(url) if !url.is_empty() => Some((key, url)),
                _ => None,
            })
            .collect();

        info!(url = %self.url, entries = map.len(), "Secondary index loaded");
        Some(map)
    }
}

impl std::fmt::Debug for SecondaryIndexLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecondaryIndexLoader")
            .field("url", &self.url)
            .field("tried", &self.index.initialized())
            .finish_non_exhaustive()
    }
}
