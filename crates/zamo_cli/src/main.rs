//! `zamo` - inspect and change Zamo wallet preferences from a terminal

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use zamo_app::{AppOptions, AppPreferences};
use zamo_i18n::Locale;
use zamo_prefs::{FileStore, MemoryStore, SharedStore};
use zamo_theme::SystemAppearance;

use crate::commands::Command;
use crate::config::ZamoConfig;

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "ZAMO_LOG";

#[derive(Parser, Debug)]
#[command(name = "zamo", version, about = "Zamo wallet preferences")]
struct Cli {
    /// Config file or directory containing zamo.toml
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Preference file, overriding the config
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Default locale, overriding the config
    #[arg(long, global = true, value_name = "CODE")]
    default_locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let (config, config_path) = ZamoConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging.filter);
    debug!("config: {}", config_path.display());

    let default_locale: Locale = match cli.default_locale.as_deref() {
        Some(code) => code.parse().context("Invalid --default-locale")?,
        None => config.default_locale()?,
    };

    let store_path = cli
        .store
        .unwrap_or_else(|| config.store_path(&config_path));
    let store = open_store(&store_path).await;

    let prefs = AppPreferences::start(
        store,
        SystemAppearance::detect(),
        AppOptions {
            default_locale,
            follow_system: config.theme.follow_system,
            catalogs: None,
        },
    )?;
    prefs.ready().await;

    let code = commands::dispatch(cli.command, &prefs, &config).await?;
    prefs.shutdown().await;
    Ok(code)
}

/// `ZAMO_LOG` wins over the config file; a bad directive falls back to `info`.
fn init_logging(config_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Open the file store, or run in memory if it cannot be read.
async fn open_store(path: &Path) -> SharedStore {
    match FileStore::open(path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("{}; preferences will not be saved this session", e);
            Arc::new(MemoryStore::new())
        }
    }
}
