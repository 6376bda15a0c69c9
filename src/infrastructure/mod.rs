//! Infrastructure layer with external service adapters.

/// Blog data API client.
pub mod api;
/// Application configuration.
pub mod config;
/// Image fetching and preloading.
pub mod images;

pub use api::JsonPlaceholderClient;
pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use images::{HttpImageFetcher, ImagePreloader, PreloadOutcome, PreloadStats};
