use std::process::ExitCode;

use clap::Parser;
use urg_core::kv::{MemoryStore, SqliteStore};
use urg_core::seed::seed_reference_guides;
use urg_core::{AppError, Store};

mod cli;
mod commands;
mod config;

use config::{AppConfig, StoreBackend};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("urgences error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let cli = cli::Cli::parse();
    let mut config = AppConfig::load_with_dotenv()?;
    if cli.memory {
        config.store.backend = StoreBackend::Memory;
    }
    if let Some(path) = &cli.db {
        config.store.backend = StoreBackend::Sqlite;
        config.store.path = Some(path.clone());
    }

    init_tracing(&config.log.level)?;

    let store = open_store(&config)?;
    // `init` reports the seeding summary itself.
    if config.seed.enabled && !matches!(cli.command, cli::Commands::Init) {
        seed_reference_guides(&store)?;
    }

    let output = commands::dispatch(cli.command, &store)?;
    let rendered = serde_json::to_string_pretty(&output).map_err(|e| {
        AppError::new("CLI_ENCODE_FAILED", "Failed to render output").with_details(e.to_string())
    })?;
    println!("{rendered}");
    Ok(())
}

fn open_store(config: &AppConfig) -> Result<Store, AppError> {
    match config.store.backend {
        StoreBackend::Memory => Ok(Store::new(MemoryStore::new())),
        StoreBackend::Sqlite => {
            let path = config.store.resolved_path()?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::new("STORE_PATH_FAILED", "Failed to create store directory")
                        .with_details(format!("path={}; err={}", parent.display(), e))
                })?;
            }
            tracing::debug!(path = %path.display(), "opening sqlite store");
            Ok(Store::new(SqliteStore::open(&path)?))
        }
    }
}

fn init_tracing(level: &str) -> Result<(), AppError> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("URGENCES_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| {
            AppError::new("CLI_LOGGING_INIT_FAILED", "Failed to initialize logging")
                .with_details(e.to_string())
        })
}
