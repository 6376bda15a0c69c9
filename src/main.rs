use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use blogview::infrastructure::config::ConfigError;
use blogview::infrastructure::{
    AppConfig, CliArgs, HttpImageFetcher, ImagePreloader, JsonPlaceholderClient, StorageManager,
};
use blogview::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match StorageManager::new() {
        Ok(storage) => storage.load_config(args.config.as_deref())?,
        Err(ConfigError::ConfigDirNotFound) => match &args.config {
            Some(path) => StorageManager::with_dir(std::env::temp_dir()).load_config(Some(path))?,
            None => AppConfig::default(),
        },
        Err(e) => return Err(e.into()),
    };
    config.merge_with_args(args);
    Ok(config)
}

fn create_app(config: &AppConfig) -> Result<App> {
    let data = Arc::new(JsonPlaceholderClient::with_base_url(
        config.api.base_url.clone(),
        config.api.timeout_secs,
    )?);
    let fetcher = Arc::new(HttpImageFetcher::new(config.images.timeout_secs)?);
    let preloader = ImagePreloader::new(fetcher);

    Ok(App::new(data, preloader, config))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = blogview::VERSION, "Starting Blogview");
    if !config.images.preload {
        warn!("Image preloading disabled");
    }

    let app = create_app(&config)?;
    let command = args.command.clone().unwrap_or_default();

    let mut stdout = std::io::stdout();
    let result = app.run(command, &mut stdout).await;
    stdout.flush()?;

    result
}
