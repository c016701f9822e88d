//! Lazy-once loader for the collection metadata index.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::ports::DocumentPort;

use super::parse::parse_index_document;

/// Builds the identifier→image-URL index from the first metadata source
/// that parses successfully and yields at least one entry.
///
/// The outcome, a populated index or confirmed absence, is memoized for
/// the process lifetime. Concurrent first callers coalesce onto a single
/// physical fetch pass; everyone observes the same result.
pub struct MetadataIndexLoader {
    sources: Vec<String>,
    gateway: String,
    documents: Arc<dyn DocumentPort>,
    index: OnceCell<Option<HashMap<String, String>>>,
}

impl MetadataIndexLoader {
    /// Creates a loader probing `sources` in order.
    #[must_use]
    pub fn new(sources: Vec<String>, gateway: String, documents: Arc<dyn DocumentPort>) -> Self {
        Self {
            sources,
            gateway,
            documents,
            index: OnceCell::new(),
        }
    }

    /// Returns the index, building it on first demand.
    ///
    /// `None` means every source failed or yielded no usable entries; that
    /// outcome is permanent and no further fetches occur.
    pub async fn ensure(&self) -> Option<&HashMap<String, String>> {
        self.index.get_or_init(|| self.build()).await.as_ref()
    }

    async fn build(&self) -> Option<HashMap<String, String>> {
        for source in &self.sources {
            match self.documents.fetch_json(source).await {
                Ok(doc) => {
                    let map = parse_index_document(&doc, &self.gateway);
                    if map.is_empty() {
                        debug!(source = %source, "Metadata document has no usable entries");
                        continue;
                    }
                    info!(source = %source, entries = map.len(), "Metadata index built");
                    return Some(map);
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "Metadata source unavailable");
                }
            }
        }

        debug!("No metadata source yielded an index");
        None
    }
}

impl std::fmt::Debug for MetadataIndexLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataIndexLoader")
            .field("sources", &self.sources)
            .field("built", &self.index.initialized())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::index::testing::StaticDocuments;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn loader(documents: StaticDocuments, sources: &[&str]) -> MetadataIndexLoader {
        MetadataIndexLoader::new(
            sources.iter().map(ToString::to_string).collect(),
            "dweb.link".to_string(),
            Arc::new(documents),
        )
    }

    #[tokio::test]
    async fn first_nonempty_source_wins() {
        let documents = StaticDocuments::new()
            .with("a.json", json!([]))
            .with("b.json", json!([{"id": 7, "image": "ipfs://bafy123"}]))
            .with("c.json", json!([{"id": 9, "image": "x.png"}]));

        let loader = loader(documents, &["a.json", "b.json", "c.json"]);
        let index = loader.ensure().await.expect("index");

        assert_eq!(index.len(), 1);
        assert_eq!(index["7"], "https://dweb.link/ipfs/bafy123");
    }

    #[tokio::test]
    async fn failures_fall_through_to_next_source() {
        let documents =
            StaticDocuments::new().with("good.json", json!({"3": "https://a.example/3.png"}));

        let loader = loader(documents, &["missing.json", "good.json"]);
        let index = loader.ensure().await.expect("index");

        assert_eq!(index["3"], "https://a.example/3.png");
    }

    #[tokio::test]
    async fn all_sources_failing_is_permanent_none() {
        let documents = StaticDocuments::new();
        let fetches = documents.counter();
        let loader = loader(documents, &["a.json", "b.json"]);

        assert!(loader.ensure().await.is_none());
        // The outcome is memoized; no further fetch pass occurs.
        assert!(loader.ensure().await.is_none());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch_pass() {
        let documents =
            StaticDocuments::new().with("a.json", json!([{"id": 1, "image": "one.png"}]));
        let fetches = documents.counter();
        let loader = Arc::new(loader(documents, &["a.json"]));

        let (a, b) = tokio::join!(loader.ensure(), loader.ensure());
        assert!(a.is_some());
        assert!(b.is_some());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }
}
