//! Serve command - run the Logtide server
//!
//! Wires the registry, redaction policy, tail broadcaster, optional
//! artifact store and ingestion pipeline together and serves the HTTP
//! API until a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use logtide_api::{build_router, AppState};
use logtide_config::{Config, StoreKind};
use logtide_ingest::{IngestPipeline, RegexPolicy};
use logtide_registry::FileRegistry;
use logtide_sinks::{ArtifactStore, DiskStore, NullStore};
use logtide_tail::TailBroadcaster;

/// Serve command arguments
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file (defaults to logtide.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = load_config(args.config)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "Logtide starting"
    );

    run_server(config).await?;

    info!("Logtide shutdown complete");
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            // User explicitly provided config path - must exist
            if !path.exists() {
                return Err(anyhow::anyhow!(
                    "config file not found: {}",
                    path.display()
                ));
            }
            Config::from_file(&path).context("failed to load configuration")
        }
        None => {
            let default_paths = [PathBuf::from("logtide.toml"), PathBuf::from("config.toml")];

            for path in &default_paths {
                if path.exists() {
                    info!(config = %path.display(), "using config file");
                    return Config::from_file(path).context("failed to load configuration");
                }
            }

            info!("no config file found, using defaults (port 5000, data in logs/)");
            Ok(Config::default())
        }
    }
}

async fn run_server(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();

    let registry = Arc::new(
        FileRegistry::new(
            &config.storage.data_dir,
            config.storage.reject_duplicate_names,
        )
        .context("failed to open registry data directory")?,
    );

    let policy = Arc::new(
        RegexPolicy::new(&config.redaction.patterns, config.redaction.replacement.as_str())
            .context("invalid redaction pattern")?,
    );

    let broadcaster = Arc::new(TailBroadcaster::with_limits(
        config.tail.max_lag,
        config.tail.max_subscribers,
    ));

    let store = build_store(&config)?;

    let pipeline = Arc::new(IngestPipeline::new(
        Arc::clone(&registry),
        Arc::clone(&broadcaster),
        policy,
        store,
    ));

    let state = AppState::new(registry, pipeline, broadcaster)
        .with_max_upload_bytes(config.server.max_upload_bytes);
    let app = build_router(state);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .context("failed to bind HTTP server")?;

    info!(addr = %addr, data_dir = %config.storage.data_dir.display(), "server listening");

    let shutdown = cancel.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
            })
            .await
    });

    wait_for_shutdown().await;
    info!("shutdown signal received, stopping server...");
    cancel.cancel();

    server.await?.context("HTTP server error")?;
    Ok(())
}

fn build_store(config: &Config) -> Result<Option<Arc<dyn ArtifactStore>>> {
    match config.store.kind {
        StoreKind::None => Ok(None),
        StoreKind::Disk => {
            // validated at load time; guard anyway for direct construction
            let path = config
                .store
                .path
                .as_ref()
                .context("store.path is required for kind = \"disk\"")?;
            let store = DiskStore::new(path).context("failed to open artifact store directory")?;
            info!(path = %path.display(), "disk artifact store enabled");
            Ok(Some(Arc::new(store)))
        }
        StoreKind::Null => Ok(Some(Arc::new(NullStore::new()))),
    }
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
