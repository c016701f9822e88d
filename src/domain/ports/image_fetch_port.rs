//! Port definition for loading candidate images.

use crate::domain::entities::FetchedImage;
use crate::domain::errors::FetchError;

/// Port for turning one candidate URL into a decoded image.
///
/// Implementations may satisfy requests from a cache; the preview
/// controller only observes success or failure per URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches and decodes the image behind `url`.
    ///
    /// # Errors
    /// Returns `FetchError` when the request fails, the status is not a
    /// success, or the body does not decode as an image.
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}
