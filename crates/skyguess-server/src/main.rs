//! Skyguess server — HTTP boundary over live aircraft data and route lookups.
//!
//! On startup it:
//!
//! 1. Reads [`AppConfig`] from the environment.
//! 2. Builds the live-state client and the route provider chain.
//! 3. Serves the `/api` routes until Ctrl-C, then stops any running poller.

mod api;
mod config;
mod error;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::api::AppState;
use crate::config::AppConfig;

/// Skyguess HTTP server.
#[derive(Parser, Debug)]
#[command(name = "skyguess-server", about = "Skyguess HTTP server")]
struct Args {
    /// Listen port; overrides `SKYGUESS_PORT`.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.listen_port = port;
    }

    info!(
        opensky = %config.feed.opensky_base_url,
        aviationstack = %config.feed.aviationstack_base_url,
        aviationstack_key = config.feed.aviationstack_api_key.is_some(),
        search = %config.feed.search_base_url,
        "upstream feeds configured"
    );

    let state =
        Arc::new(AppState::from_config(&config).context("failed to build upstream clients")?);
    let app = api::router(Arc::clone(&state));

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(address = %addr, "skyguess server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await
        .context("server error")?;

    state.shutdown().await;
    info!("skyguess server stopped");
    Ok(())
}
