//! Test doubles for the index loaders.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::domain::errors::DocumentError;
use crate::domain::ports::DocumentPort;

/// In-memory `DocumentPort` serving canned documents by URL.
///
/// URLs without a canned document answer with a network error, and every
/// fetch attempt is counted so tests can assert on laziness.
#[derive(Default)]
pub struct StaticDocuments {
    docs: HashMap<String, Value>,
    fetches: Arc<AtomicUsize>,
}

impl StaticDocuments {
    /// Creates an empty store; every fetch fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a canned document for `url`.
    #[must_use]
    pub fn with(mut self, url: &str, doc: Value) -> Self {
        self.docs.insert(url.to_string(), doc);
        self
    }

    /// Returns a handle to the fetch counter, usable after the store has
    /// been moved behind `Arc<dyn DocumentPort>`.
    #[must_use]
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait::async_trait]
impl DocumentPort for StaticDocuments {
    async fn fetch_json(&self, url: &str) -> Result<Value, DocumentError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.docs
            .get(url)
            .cloned()
            .ok_or_else(|| DocumentError::network("connection refused"))
    }
}
