use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sangeet_content_server::config::{AppConfig, CliConfig, FileConfig};
use sangeet_content_server::content_store::SqliteEntityStore;
use sangeet_content_server::seed::class_seed;
use sangeet_content_server::server::{run_server, GuardedEntityStore, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite content database file, created if missing.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Directory uploaded images are written to and served from.
    #[clap(long, value_parser = parse_path)]
    pub media_path: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Run the music class seed migration before serving.
    #[clap(long)]
    pub seed_on_start: bool,

    /// Largest accepted request body in megabytes.
    #[clap(long)]
    pub max_upload_mb: Option<usize>,

    /// Optional TOML config file, its values override the CLI.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            media_path: self.media_path.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            frontend_dir_path: self.frontend_dir_path.clone(),
            seed_on_start: self.seed_on_start,
            max_upload_mb: self.max_upload_mb,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Opening SQLite content database at {:?}...", config.db_path);
    let store = SqliteEntityStore::new(&config.db_path)?;

    if config.seed_on_start {
        let report = class_seed().run(&store);
        info!(
            "Class seed: {} created, {} skipped, {} failed",
            report.created, report.skipped, report.failed
        );
        if report.has_failures() {
            warn!("Class seed finished with errors: {:?}", report.errors);
        }
    }

    let entity_store: GuardedEntityStore = Arc::new(store);
    info!("Serving media from {:?}", config.media_path);
    info!("Ready to serve at port {}!", config.port);
    run_server(config.server_config(), entity_store).await
}
