use anyhow::{Context, Result};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sangeet_content_server::content_store::{
    ContentEntity, EntityStore, MusicClass, SqliteEntityStore,
};
use sangeet_content_server::seed::{class_seed, SeedStatus};

fn get_styles() -> Styles {
    Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
}

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to the SQLite content database file.
    #[clap(value_parser = parse_path)]
    pub db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists the canonical class pages and whether each is already stored.
    Inspect,

    /// Inserts the canonical class pages that are missing.
    Run {
        /// Print the full report as JSON.
        #[clap(long)]
        json: bool,
    },
}

fn inspect(store: &dyn EntityStore) -> Result<()> {
    let runner = class_seed();
    println!("{} canonical class pages:", runner.total());
    for class in runner.candidates() {
        let stored = store.exists(MusicClass::KIND, class.slug())?;
        println!(
            "  [{}] {} ({})",
            if stored { "x" } else { " " },
            class.slug(),
            class.display_name()
        );
    }
    Ok(())
}

fn run(store: &dyn EntityStore, json: bool) -> Result<()> {
    let report = class_seed().run(store);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &report.results {
            let marker = match outcome.status {
                SeedStatus::Created => "+",
                SeedStatus::Skipped => "=",
                SeedStatus::Error => "!",
            };
            println!("  {} {}: {}", marker, outcome.slug, outcome.message);
        }
        println!(
            "{} total, {} created, {} skipped, {} failed",
            report.total, report.created, report.skipped, report.failed
        );
    }

    if report.has_failures() {
        anyhow::bail!("{} class pages failed to migrate", report.failed);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let store = SqliteEntityStore::new(&cli_args.db_path)
        .with_context(|| format!("Could not open content db at {:?}", cli_args.db_path))?;

    match cli_args.command {
        Command::Inspect => inspect(&store),
        Command::Run { json } => run(&store, json),
    }
}
