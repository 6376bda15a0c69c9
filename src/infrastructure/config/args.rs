use super::app_config::LogLevel;
use crate::application::dto::ProfileTab;
use crate::application::services::pagination::LayoutWidth;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "blogview",
    version,
    about = "A terminal blog reader with image preloading",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the blog API.
    #[arg(long, env = "BLOGVIEW_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Base URL of the seeded image service.
    #[arg(long, env = "BLOGVIEW_IMAGE_SERVICE", value_name = "URL", global = true)]
    pub image_service: Option<String>,

    /// Warm post images before showing them.
    #[arg(long, global = true)]
    pub preload: Option<bool>,

    /// Warm the first posts' images before the home feed is shown.
    #[arg(long, global = true)]
    pub warm_up: Option<bool>,

    /// Terminal width class used to size feed pages.
    #[arg(long, value_enum, global = true)]
    pub layout: Option<LayoutWidth>,

    /// View to show; defaults to the home feed.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Views and actions.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Featured post and a page of recent posts.
    Home {
        /// One-based page number.
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// A post with its author and comments.
    Post {
        /// Post id.
        id: u64,
    },
    /// All authors with their post counts.
    Users,
    /// An author's profile.
    User {
        /// User id.
        id: u64,
        /// Profile tab to show.
        #[arg(long, value_enum, default_value_t = ProfileTab::Info)]
        tab: ProfileTab,
    },
    /// Warm the images of the given post ids and report progress.
    Preload {
        /// Post ids.
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<i64>,
        /// Image width in pixels.
        #[arg(long, default_value_t = 400)]
        width: u32,
        /// Image height in pixels.
        #[arg(long, default_value_t = 200)]
        height: u32,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Home { page: 1 }
    }
}
