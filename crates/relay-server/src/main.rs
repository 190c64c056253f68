//! Chat relay binary.
//!
//! Loads layered settings once, installs tracing and metrics, binds the
//! listener, and serves until Ctrl-C.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_server::metrics::install_recorder;
use relay_server::{AppState, build_router};
use relay_settings::{RelaySettings, load_settings, load_settings_from_path};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Single-endpoint relay from `POST /chat` to an upstream
/// chat-completions API.
#[derive(Debug, Parser)]
#[command(name = "chat-relay", version)]
struct Args {
    /// Bind address (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Settings file path (overrides `$RELAY_SETTINGS_PATH`).
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => load_settings_from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => load_settings().context("loading settings")?,
    };
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    init_tracing(&settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let has_key = settings
        .upstream
        .api_key
        .as_ref()
        .is_some_and(|k| !k.is_empty());
    if !has_key {
        tracing::warn!("no API key configured; /chat will fast-fail until one is set");
    }

    let handle = install_recorder();
    let state = AppState::from_settings(settings).with_metrics(handle);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        %addr,
        model = %state.settings.upstream.model,
        timeout_secs = state.settings.upstream.timeout_secs,
        "chat relay listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;
    Ok(())
}

/// `RUST_LOG` wins; otherwise the settings level (or `debug` when the
/// debug flag is set).
fn init_tracing(settings: &RelaySettings) {
    let default = if settings.server.debug {
        "debug".to_owned()
    } else {
        settings.logging.level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }
}
