//! HTTP image fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetcherPort;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Downloads images over HTTP and decodes them off the async runtime.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher whose requests time out after `timeout_secs`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http_client })
    }

    /// Creates a fetcher with the default timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }

    async fn download(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Image request failed");
            FetchError::Network(format!("Request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read body: {e}")))
    }
}

/// Decodes an encoded image (PNG, JPEG or WebP).
///
/// # Errors
/// Returns `FetchError::Decode` if the bytes are not a supported image.
pub fn decode(bytes: &[u8]) -> Result<image::DynamicImage, FetchError> {
    image::load_from_memory(bytes).map_err(|e| FetchError::Decode(format!("Failed to decode image: {e}")))
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<image::DynamicImage, FetchError> {
        let bytes = self.download(url).await?;
        debug!(url = %url, size = bytes.len(), "Downloaded image");

        tokio::task::spawn_blocking(move || decode(&bytes))
            .await
            .map_err(|e| FetchError::TaskFailed(format!("Decode task panicked: {e}")))?
    }
}
