//! Forwarding handler: the GET side of the proxy.
//!
//! # Responsibilities
//! - Extract the target URL from the `url` query parameter
//! - Issue exactly one outbound fetch per inbound request
//! - Relay upstream status, headers, and body back to the client
//!
//! # Design Decisions
//! - The target is handed to the client as an opaque string; invalid URLs
//!   surface as fetch failures, not as a pre-validation step
//! - Streaming responses avoid buffering the entire body
//! - Hop-by-hop headers are stripped; the rest pass through verbatim
//! - Upstream non-2xx statuses are not errors and pass through unchanged

use std::time::Instant;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::http::cors;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Query parameters accepted by the forwarder.
#[derive(Debug, Deserialize)]
pub struct ForwardQuery {
    url: Option<String>,
}

/// Forward a GET request to the target named in `?url=` and relay the
/// upstream response with the CORS headers overwritten.
pub async fn forward(
    State(state): State<AppState>,
    Query(query): Query<ForwardQuery>,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).to_string();

    // An absent or empty parameter is terminal; no outbound call is made.
    let target = match query.url.filter(|u| !u.is_empty()) {
        Some(t) => t,
        None => {
            tracing::debug!(request_id = %request_id, "Missing url parameter");
            metrics::record_request("GET", StatusCode::BAD_REQUEST.as_u16(), start_time);
            return (StatusCode::BAD_REQUEST, "Missing ?url").into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        target = %target,
        "Forwarding request"
    );

    let upstream = match state.client.get(&target).send().await {
        Ok(res) => res,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                target = %target,
                error = %e,
                "Upstream error"
            );
            metrics::record_request("GET", StatusCode::BAD_GATEWAY.as_u16(), start_time);
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    let status = upstream.status();
    let upstream_headers = upstream.headers().clone();

    metrics::record_request("GET", status.as_u16(), start_time);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;

    let out = response.headers_mut();
    for (name, value) in upstream_headers.iter() {
        if is_hop_by_hop(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    cors::apply(out);

    response
}

/// Connection-level headers (RFC 7230 §6.1). These describe the upstream
/// hop, not the relayed representation; the server frames its own response.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    name == header::CONNECTION
        || name == header::PROXY_AUTHENTICATE
        || name == header::PROXY_AUTHORIZATION
        || name == header::TE
        || name == header::TRAILER
        || name == header::TRANSFER_ENCODING
        || name == header::UPGRADE
        || name.as_str() == "keep-alive"
}
