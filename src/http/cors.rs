//! Permissive CORS header set and preflight handling.
//!
//! The proxy exists to put cross-origin responses in front of browsers, so
//! the header values are fixed literals: any origin, GET and OPTIONS, any
//! request header. The inbound `Origin` header is never echoed or checked.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, OPTIONS";
const ALLOW_HEADERS: &str = "*";

/// Insert the permissive CORS headers, overwriting any value already
/// present under the same name (an upstream may send its own).
pub fn apply(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// Handle a browser preflight request.
///
/// Always a 204 with no body and the fixed CORS headers, regardless of the
/// request's contents.
pub async fn preflight() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_fixed_literals() {
        let mut headers = HeaderMap::new();
        apply(&mut headers);

        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, OPTIONS"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "*");
    }

    #[test]
    fn apply_overwrites_upstream_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("https://upstream.example"),
        );
        apply(&mut headers);

        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(
            headers
                .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .iter()
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn preflight_is_204_with_no_body() {
        let response = preflight().await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert!(body.is_empty());
    }
}
