//! Image fetch and preload error types.

use thiserror::Error;

/// Reasons a single image fetch can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("fetch task ended without a result: {0}")]
    TaskFailed(String),
}

/// A preload that ended in the terminal error state.
///
/// Cloned to every caller waiting on the same URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load image {url}: {source}")]
pub struct ImageLoadFailure {
    /// URL whose fetch failed.
    pub url: String,
    /// Underlying cause.
    #[source]
    pub source: FetchError,
}

impl ImageLoadFailure {
    /// Records `source` as the failure of `url`.
    #[must_use]
    pub fn new(url: impl Into<String>, source: FetchError) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}
