//! Serve command - run the Peek relay
//!
//! Wires the configuration into the relay service, mounts the HTTP and
//! tool-protocol routers on one listener, and runs until interrupted.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use peek_config::{Config, DEFAULT_CONFIG_PATH};
use peek_mcp::McpFacade;
use peek_server::{HandlerState, RelayConfig, RelayService};

/// Serve command arguments
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file (defaults to peek.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Force debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config_path = args
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(default)".to_string());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        config = %config_path,
        "Peek starting"
    );

    // Load configuration; an explicit --config path must exist, the implicit
    // default path is only used when present
    if args.config.is_none() {
        let default = Path::new(DEFAULT_CONFIG_PATH);
        if default.exists() {
            info!(config = %default.display(), "using config file");
        } else {
            info!("no config file found, using defaults (relay on 127.0.0.1:8969)");
        }
    }
    let config =
        Config::load(args.config.as_deref()).context("failed to load configuration")?;

    // Run the relay
    if let Err(e) = run_server(config, args.port).await {
        error!(error = %e, "relay error");
        return Err(e);
    }

    info!("Peek shutdown complete");
    Ok(())
}

/// Main relay run loop
async fn run_server(config: Config, port_override: Option<u16>) -> Result<()> {
    // Cancellation token for coordinated shutdown
    let cancel = CancellationToken::new();

    let relay = Arc::new(RelayService::new(RelayConfig {
        buffer_capacity: config.buffer.capacity,
        evict_idle_sessions: config.sessions.evict_idle,
        session_max_idle: config.sessions.max_idle(),
        sweep_interval: config.sessions.sweep_interval(),
    }));

    // Background sweep: disconnected subscribers, idle sessions
    let maintenance = relay.spawn_maintenance(cancel.clone());

    let state = Arc::new(HandlerState {
        relay: Arc::clone(&relay),
        max_payload_size: config.server.max_payload_size,
    });
    let facade = Arc::new(McpFacade::new(Arc::clone(&relay)));

    // Ingestion/streaming API and the tool-protocol endpoint share one listener
    let app = peek_server::router(state).merge(peek_mcp::router(facade));

    let port = port_override.unwrap_or(config.server.port);
    let bind = format!("{}:{}", config.server.address, port);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    info!(
        address = %bind,
        buffer_capacity = config.buffer.capacity,
        evict_idle = config.sessions.evict_idle,
        "Peek relay running (use `peek tail` to stream)"
    );

    let shutdown = {
        let cancel = cancel.clone();
        async move {
            wait_for_shutdown().await;
            info!("shutdown signal received, stopping relay...");
            cancel.cancel();
        }
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .context("relay server error")?;

    // The maintenance task observes the cancellation token and exits on its own
    let _ = maintenance.await;

    Ok(())
}

/// Wait for SIGINT or SIGTERM
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
