//! HTTP image fetching and decoding.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::entities::{FetchedImage, ImageId, ImageSource};
use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetchPort;

use super::memory_cache::MemoryImageCache;

/// Images wider than this are downscaled after decoding. Terminal cells are
/// coarse; keeping full-resolution art in memory buys nothing.
const MAX_DECODE_WIDTH: u32 = 800;
const MAX_DECODE_HEIGHT: u32 = 600;

/// Fetches candidate images over HTTP, decoding off the async runtime.
///
/// Consults the in-memory cache first; a hit is indistinguishable from a
/// fast network success to callers.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    cache: Arc<MemoryImageCache>,
}

impl HttpImageFetcher {
    /// Creates a fetcher sharing `client`'s connection pool.
    #[must_use]
    pub fn new(client: reqwest::Client, cache: Arc<MemoryImageCache>) -> Self {
        Self { client, cache }
    }

    /// Returns memory cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> super::memory_cache::CacheStats {
        self.cache.stats()
    }

    async fn download(&self, url: &str) -> Result<bytes::Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::network)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response.bytes().await.map_err(FetchError::network)
    }
}

#[async_trait::async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let id = ImageId::from_url(url);

        if let Some(img) = self.cache.get(&id) {
            return Ok(FetchedImage {
                id,
                image: img,
                source: ImageSource::MemoryCache,
            });
        }

        trace!(id = %id, url = %url, "Downloading candidate image");
        let bytes = self.download(url).await?;

        let decoded = tokio::task::spawn_blocking(move || -> Result<image::DynamicImage, FetchError> {
            let img = image::load_from_memory(&bytes).map_err(FetchError::decode)?;

            if img.width() > MAX_DECODE_WIDTH {
                Ok(img.resize(
                    MAX_DECODE_WIDTH,
                    MAX_DECODE_HEIGHT,
                    image::imageops::FilterType::Lanczos3,
                ))
            } else {
                Ok(img)
            }
        })
        .await
        .map_err(|e| FetchError::decode(format!("decode task panicked: {e}")))??;

        let img = Arc::new(decoded);
        self.cache.put(id.clone(), img.clone());

        debug!(id = %id, url = %url, "Candidate image loaded");

        Ok(FetchedImage {
            id,
            image: img,
            source: ImageSource::Network,
        })
    }
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher")
            .field("cache", &self.cache.len())
            .finish_non_exhaustive()
    }
}
