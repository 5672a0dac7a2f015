//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): total requests by method, status
//! - `proxy_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Exporter runs on its own listener, scraped by Prometheus

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    let method = method.to_string();
    let status = status.to_string();

    counter!(
        "proxy_requests_total",
        "method" => method.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "proxy_request_duration_seconds",
        "method" => method,
        "status" => status
    )
    .record(start_time.elapsed().as_secs_f64());
}
