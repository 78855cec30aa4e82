//! Ecosystem - browse the crate catalog and filter it by tag
//!
//! Main entry point: parses arguments, sets up logging, resolves the
//! configuration and dispatches to the command implementations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use ecosystem_core::config::Config;

mod browse;
mod catalog_cli;
mod config_cli;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "ecosystem",
    about = "Browse the crate ecosystem catalog and filter it by tag",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Override configuration file path
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog document to load (path or http(s) URL), overrides the config
    #[clap(long, global = true)]
    catalog: Option<String>,

    /// Tag description document (path or http(s) URL), overrides the config
    #[clap(long, global = true)]
    tags_file: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[clap(flatten)]
    Catalog(catalog_cli::CatalogSubcommand),

    /// Inspect or create the configuration file
    Config {
        #[clap(subcommand)]
        command: config_cli::ConfigCommand,
    },
}

/// Initialize tracing with CLI flags
///
/// `RUST_LOG` directives are added on top of --log-level. Logs always go to
/// stderr so stdout stays usable for JSON output.
fn initialize_tracing(log_level: &LogLevel) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    if let Ok(env) = std::env::var("RUST_LOG") {
        for directive in env.split(',').filter(|d| !d.trim().is_empty()) {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Path of the configuration file in effect
fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Config::default_path(),
    }
}

/// Load the configuration file (defaults when there is none) and apply
/// command line overrides
fn resolve_config(cli: &Cli, path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::default(),
    };

    if let Some(catalog) = &cli.catalog {
        config.catalog = catalog.clone();
    }
    if let Some(tags) = &cli.tags_file {
        config.tags = Some(tags.clone());
    }
    config
        .validate()
        .context("Invalid configuration after applying command line overrides")?;

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let config_path = config_path(&cli);
    // `config init` must work even when the existing file is broken
    let config = match &config_path {
        Ok(path) => resolve_config(&cli, Some(path.as_path())),
        Err(e) => {
            tracing::debug!("No config location ({:#}), using defaults", e);
            resolve_config(&cli, None)
        }
    };

    match cli.command {
        Command::Catalog(command) => {
            let config = config?;
            tracing::debug!("Using catalog {}", config.catalog);
            command.execute(&config).await
        }
        Command::Config { command } => {
            let config_path = config_path?;
            command.execute(config, &config_path)
        }
    }
}
