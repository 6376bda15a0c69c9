//! Port definition for fetching and decoding remote images.

use async_trait::async_trait;

use crate::domain::errors::FetchError;

/// Port for downloading and decoding a single image.
/// Implementations must be thread-safe.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads the image at `url` and decodes it.
    async fn fetch(&self, url: &str) -> Result<image::DynamicImage, FetchError>;
}
