//! Ordered candidate URL resolution.

use std::sync::Arc;

use tracing::trace;

use crate::infrastructure::config::CollectionConfig;
use crate::infrastructure::index::{MetadataIndexLoader, SecondaryIndexLoader};

/// Merges both indices with the conventional path templates into an
/// ordered candidate list. Earlier entries carry higher trust.
///
/// Order is fixed: metadata index entry, secondary index entry, then
/// thumbnail PNG, thumbnail JPEG, full PNG, full JPEG. Duplicates are kept;
/// the first successful load wins regardless.
pub struct CandidateResolver {
    metadata: Arc<MetadataIndexLoader>,
    secondary: Arc<SecondaryIndexLoader>,
    collection: CollectionConfig,
}

impl CandidateResolver {
    /// Creates a resolver over the two index loaders.
    #[must_use]
    pub fn new(
        metadata: Arc<MetadataIndexLoader>,
        secondary: Arc<SecondaryIndexLoader>,
        collection: CollectionConfig,
    ) -> Self {
        Self {
            metadata,
            secondary,
            collection,
        }
    }

    /// Builds the candidate list for `id`.
    ///
    /// Awaits both index loaders (triggering lazy initialization on first
    /// call) and nothing else.
    pub async fn candidates(&self, id: &str) -> Vec<String> {
        let mut urls = Vec::new();

        if let Some(index) = self.metadata.ensure().await
            && let Some(url) = index.get(id)
        {
            urls.push(url.clone());
        }

        if let Some(index) = self.secondary.ensure().await
            && let Some(url) = index.get(id)
        {
            urls.push(url.clone());
        }

        urls.extend(self.collection.template_urls(id));

        trace!(id = %id, count = urls.len(), "Built candidate list");
        urls
    }
}

impl std::fmt::Debug for CandidateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateResolver")
            .field("metadata", &self.metadata)
            .field("secondary", &self.secondary)
            .finish_non_exhaustive()
    }
}
