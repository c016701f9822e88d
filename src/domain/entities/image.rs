//! Domain types for fetched images.

use std::sync::Arc;

/// Unique identifier for a cached image, derived from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(pub String);

impl ImageId {
    /// Creates a new `ImageId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates an `ImageId` from a URL by hashing it.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a fetched image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the in-memory LRU cache.
    MemoryCache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemoryCache => write!(f, "memory"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A decoded image together with its cache identity and origin.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// Cache identity of the image.
    pub id: ImageId,
    /// The decoded pixels, shared between cache and consumers.
    pub image: Arc<image::DynamicImage>,
    /// Which tier satisfied the request.
    pub source: ImageSource,
}
