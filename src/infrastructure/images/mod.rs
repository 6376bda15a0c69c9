//! Image handling infrastructure.
//!
//! This module provides:
//! - HTTP download and decoding of remote images
//! - A preload cache that fetches each URL at most once

/// HTTP image fetcher.
pub mod fetcher;
/// Shared preload cache.
pub mod preloader;

pub use fetcher::HttpImageFetcher;
pub use preloader::{BatchSummary, ImagePreloader, PreloadOutcome, PreloadResult, PreloadStats};
