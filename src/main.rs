//! CORS Pass-Through Proxy (v1)
//!
//! A small HTTP proxy built with Tokio and Axum. A GET request carrying a
//! target URL in the `url` query parameter is fetched server-side and the
//! upstream status, headers, and body are relayed back to the caller with
//! permissive cross-origin headers attached. An OPTIONS handler answers
//! browser preflight requests.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 CORS PROXY                    │
//!                      │                                               │
//!     Client Request   │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ─────────────────┼─▶│  http   │───▶│ forward  │───▶│ outbound│──┼──── Upstream
//!                      │  │ server  │    │ handler  │    │  fetch  │  │     Server
//!                      │  └─────────┘    └────┬─────┘    └────┬────┘  │
//!                      │                      │               │       │
//!     Client Response  │  ┌─────────┐    ┌───▼─────┐         │       │
//!     ◀────────────────┼──│  CORS   │◀───│ relayed │◀────────┘       │
//!                      │  │ headers │    │ stream  │                  │
//!                      │  └─────────┘    └─────────┘                  │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │          Cross-Cutting Concerns          │ │
//!                      │  │  ┌────────┐ ┌───────────┐ ┌───────────┐ │ │
//!                      │  │  │ config │ │ observa-  │ │ lifecycle │ │ │
//!                      │  │  │        │ │ bility    │ │           │ │ │
//!                      │  │  └────────┘ └───────────┘ └───────────┘ │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_proxy::config::{load_config, ProxyConfig};
use cors_proxy::http::HttpServer;
use cors_proxy::lifecycle::{signals, Shutdown};
use cors_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "cors-proxy")]
#[command(about = "HTTP pass-through proxy with permissive CORS headers", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address (e.g. "127.0.0.1:8080").
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listener.bind_address = listen;
    }

    logging::init_logging(&config.observability);

    tracing::info!("cors-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        connect_timeout_secs = config.timeouts.connect_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Translate SIGINT/SIGTERM into a graceful shutdown
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
