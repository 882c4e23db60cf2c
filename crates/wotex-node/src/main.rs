//! wotex Node — entry point.
//!
//! Loads a web-of-trust dataset and serves trust-distance queries over HTTP,
//! with configuration from a TOML file or defaults.

mod api;
mod config;
mod state;
mod storage;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::WotexConfig;
use state::NodeState;
use wotex_explorer::TrustExplorer;

/// wotex Node
#[derive(Parser, Debug)]
#[command(name = "wotex-node", version, about = "Web-of-trust distance explorer node")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "wotex.toml")]
    config: PathBuf,

    /// Override the API listen address.
    #[arg(long)]
    host: Option<String>,

    /// Override the API port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the dataset path.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

fn init_tracing(config: &config::LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.is_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = WotexConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.api.listen_addr = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(dataset) = args.dataset {
        config.storage.dataset = dataset;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging);

    // Handle --init flag
    if args.init {
        config.save(&args.config)?;
        tracing::info!(path = %args.config.display(), "wrote default config");
        return Ok(());
    }

    config.explorer.validate()?;
    let listen_addr = config.api_addr()?;

    tracing::info!("wotex node v{}", env!("CARGO_PKG_VERSION"));

    let store = storage::open_store(&config.storage.dataset)?;
    let explorer = TrustExplorer::new(store.clone(), store.clone(), config.explorer.clone());
    let state = Arc::new(NodeState::new(explorer, store, config.storage.dataset.clone()));

    // Set up graceful shutdown on SIGINT
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("received shutdown signal");
    };

    tokio::select! {
        result = api::start_api_server(listen_addr, state) => {
            result?;
        }
        _ = shutdown => {
            tracing::info!("initiating graceful shutdown");
        }
    }

    tracing::info!("wotex node exited cleanly");
    Ok(())
}
