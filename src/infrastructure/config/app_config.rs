//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::application::services::image_urls::DEFAULT_IMAGE_SERVICE;
use crate::application::services::pagination::LayoutWidth;
use crate::infrastructure::api::DEFAULT_API_BASE;

pub(crate) const APP_NAME: &str = "blogview";
pub(crate) const APP_QUALIFIER: &str = "io";
pub(crate) const APP_ORGANIZATION: &str = "blogview";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Data API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Image service and preloading configuration.
    #[serde(default)]
    pub images: ImagesConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Data API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the blog API.
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Image configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Base URL of the seeded image service.
    #[serde(default = "default_image_service")]
    pub service_url: String,

    /// Warm post images before they are shown.
    #[serde(default = "default_true")]
    pub preload: bool,

    /// Warm the leading posts' images before the home feed is first shown.
    #[serde(default = "default_true")]
    pub warm_up: bool,

    /// Image request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            service_url: default_image_service(),
            preload: true,
            warm_up: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Width class used to size feed pages.
    #[serde(default)]
    pub layout: LayoutWidth,
}

fn default_api_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_image_service() -> String {
    DEFAULT_IMAGE_SERVICE.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api.base_url.clone_from(api_url);
        }
        if let Some(image_service) = &args.image_service {
            self.images.service_url.clone_from(image_service);
        }
        if let Some(preload) = args.preload {
            self.images.preload = preload;
        }
        if let Some(warm_up) = args.warm_up {
            self.images.warm_up = warm_up;
        }
        if let Some(layout) = args.layout {
            self.ui.layout = layout;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("blogview.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            api: ApiConfig::default(),
            images: ImagesConfig::default(),
            ui: UiConfig::default(),
        }
    }
}
