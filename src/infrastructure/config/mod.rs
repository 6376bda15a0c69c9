//! Application configuration.

/// Configuration model and CLI merging.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Config file storage.
pub mod storage;

pub use app_config::{ApiConfig, AppConfig, ImagesConfig, LogLevel, UiConfig};
pub use args::{CliArgs, Command};
pub use storage::{ConfigError, StorageManager};
