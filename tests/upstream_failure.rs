//! Failure handling when the upstream cannot be reached.

use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn unreachable_upstream_returns_502() {
    let dead = common::unreachable_addr().await;
    let (proxy, shutdown) = common::start_proxy().await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{}/proxy", proxy))
        .query(&[("url", format!("http://{}/", dead))])
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(res.text().await.unwrap(), "Upstream request failed");

    shutdown.trigger();
}

#[tokio::test]
async fn unparseable_target_returns_502() {
    let (proxy, shutdown) = common::start_proxy().await;
    let client = common::test_client();

    // The target is opaque to the proxy; a nonsense value surfaces as a
    // fetch failure, not a validation error.
    let res = client
        .get(format!("http://{}/proxy", proxy))
        .query(&[("url", "not a url at all")])
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(res.text().await.unwrap(), "Upstream request failed");

    shutdown.trigger();
}

#[tokio::test]
async fn other_methods_are_not_handled() {
    let (proxy, shutdown) = common::start_proxy().await;
    let client = common::test_client();

    let res = client
        .post(format!("http://{}/proxy?url=http://127.0.0.1:1/", proxy))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    shutdown.trigger();
}
