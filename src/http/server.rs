//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the preflight and forward handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Build the shared outbound client
//! - Serve with graceful shutdown
//!
//! Method dispatch is the whole routing story: OPTIONS answers preflight,
//! GET forwards, anything else falls through to Axum's default 405.

use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::cors::preflight;
use crate::http::forward::forward;
use crate::http::request::RequestIdLayer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared outbound client. Connection pooling lives here.
    pub client: reqwest::Client,
}

/// HTTP server for the CORS proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;

        let state = AppState { client };
        let router = Self::build_router(&config, state);

        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(forward).options(preflight))
            .route("/{*path}", get(forward).options(preflight))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(RequestIdLayer)
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
