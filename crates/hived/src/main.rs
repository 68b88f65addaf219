//! hived - LogHive daemon
//!
//! Serves the log ingestion and retrieval API over HTTP, backed by an
//! in-memory or file-based record store.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hive_api::ApiServer;
use hive_logs::{FileStore, MemoryStore, RecordStore};
use hived::config::{ServerConfig, StoreBackend};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hived")]
#[command(about = "LogHive log ingestion and retrieval daemon")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Run {
        /// Path to config file
        #[arg(short, long, env = "LOGHIVE_CONFIG")]
        config: Option<PathBuf>,

        /// Override the bind address from the config
        #[arg(long, env = "LOGHIVE_BIND")]
        bind: Option<SocketAddr>,
    },

    /// Validate a config file without starting the server
    CheckConfig {
        /// Path to config file
        #[arg(short, long, default_value = "/etc/loghive/config.toml")]
        config: PathBuf,
    },

    /// Generate a sample config file
    InitConfig {
        /// Path to write config
        #[arg(short, long, default_value = "/etc/loghive/config.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, bind } => {
            run_server(config, bind).await?;
        }

        Commands::CheckConfig { config } => {
            check_config(&config)?;
        }

        Commands::InitConfig { output } => {
            init_config(&output)?;
        }
    }

    Ok(())
}

async fn run_server(config_path: Option<PathBuf>, bind: Option<SocketAddr>) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => {
            info!(config = %path.display(), "loading config");
            ServerConfig::from_file(path)?
        }
        None => ServerConfig::default(),
    };

    if let Some(bind) = bind {
        config.bind_addr = bind;
    }

    info!(
        addr = %config.bind_addr,
        backend = ?config.store.backend,
        rate_limit = config.rate_limit.enabled,
        cache = config.cache.enabled,
        "starting hived"
    );

    let store = build_store(&config)?;
    let server = ApiServer::new(config.api_config(), store);

    if let Err(e) = server
        .serve_with_shutdown(config.bind_addr, shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        anyhow::bail!("{e}");
    }

    Ok(())
}

fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    match config.store.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::File => {
            let path = config
                .store
                .path
                .as_ref()
                .context("store.path is required for the file backend")?;
            let store = FileStore::open(path)?;
            info!(
                path = %path.display(),
                records = store.len(),
                "opened file store"
            );
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}

fn check_config(path: &Path) -> anyhow::Result<()> {
    let config = ServerConfig::from_file(path)?;

    println!("Config OK: {}", path.display());
    println!();
    println!("  bind_addr: {}", config.bind_addr);
    if !config.cors_origins.is_empty() {
        println!("  cors origins: {}", config.cors_origins.join(", "));
    }
    println!("  store: {:?}", config.store.backend);
    if let Some(store_path) = &config.store.path {
        println!("  store path: {}", store_path.display());
    }
    println!(
        "  rate limit: {} ({} requests / {}s)",
        if config.rate_limit.enabled { "on" } else { "off" },
        config.rate_limit.max_requests,
        config.rate_limit.window_secs
    );
    println!(
        "  cache: {} (ttl {}s)",
        if config.cache.enabled { "on" } else { "off" },
        config.cache.ttl_secs
    );

    Ok(())
}

fn init_config(output: &Path) -> anyhow::Result<()> {
    let config = ServerConfig::default();
    let toml_str = toml::to_string_pretty(&config).context("failed to serialize config")?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, toml_str)?;

    println!("Config written to {}", output.display());
    println!();
    println!("Edit the file, then run:");
    println!("  hived run --config {}", output.display());

    Ok(())
}
