//! In-memory LRU cache for decoded images.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::ImageId;

/// Default maximum number of decoded images kept in memory.
pub const DEFAULT_CACHE_SIZE: usize = 32;

/// LRU cache of decoded images keyed by URL hash.
///
/// Process lifetime only; nothing is persisted. A hit simply makes a
/// candidate load instantaneous.
pub struct MemoryImageCache {
    cache: Mutex<LruCache<ImageId, Arc<image::DynamicImage>>>,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
}

impl MemoryImageCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Gets an image, promoting it in the LRU order.
    pub fn get(&self, id: &ImageId) -> Option<Arc<image::DynamicImage>> {
        let mut cache = self.cache.lock();
        if let Some(img) = cache.get(id) {
            self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(id = %id, "Memory cache hit");
            Some(img.clone())
        } else {
            self.misses
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(id = %id, "Memory cache miss");
            None
        }
    }

    /// Stores an image.
    pub fn put(&self, id: ImageId, image: Arc<image::DynamicImage>) {
        let mut cache = self.cache.lock();
        debug!(id = %id, "Storing image in memory cache");
        cache.put(id, image);
    }

    /// Returns the current number of cached images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all images.
    pub fn clear(&self) {
        self.cache.lock().clear();
        debug!("Cleared memory image cache");
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(std::sync::atomic::Ordering::Relaxed);
        let misses = self.misses.load(std::sync::atomic::Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels() -> Arc<image::DynamicImage> {
        Arc::new(image::DynamicImage::new_rgb8(10, 10))
    }

    #[test]
    fn test_cache_put_and_get() {
        let cache = MemoryImageCache::new(10);
        let id = ImageId::new("test1");

        cache.put(id.clone(), pixels());
        let retrieved = cache.get(&id);

        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().width(), 10);
    }

    #[test]
    fn test_cache_miss() {
        let cache = MemoryImageCache::new(10);
        assert!(cache.get(&ImageId::new("nonexistent")).is_none());
    }

    #[test]
    fn test_lru_eviction() {
        let cache = MemoryImageCache::new(2);

        cache.put(ImageId::new("a"), pixels());
        cache.put(ImageId::new("b"), pixels());
        cache.put(ImageId::new("c"), pixels());

        assert!(cache.get(&ImageId::new("a")).is_none());
        assert!(cache.get(&ImageId::new("b")).is_some());
        assert!(cache.get(&ImageId::new("c")).is_some());
    }

    #[test]
    fn test_cache_stats() {
        let cache = MemoryImageCache::new(10);
        let id = ImageId::new("test1");
        cache.put(id.clone(), pixels());

        let _ = cache.get(&id);
        let _ = cache.get(&ImageId::new("missing"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }
}
