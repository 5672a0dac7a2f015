//! Shared utilities for integration testing.

use std::net::SocketAddr;

use cors_proxy::config::ProxyConfig;
use cors_proxy::http::HttpServer;
use cors_proxy::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start the proxy on an ephemeral port.
///
/// Returns the bound address and the shutdown coordinator; trigger it at
/// the end of the test to stop the server task.
pub async fn start_proxy() -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(ProxyConfig::default()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Start a mock upstream that answers every request with a fixed status,
/// header set, and body. Returns the bound address.
#[allow(dead_code)]
pub async fn start_mock_upstream(
    status: u16,
    headers: &'static [(&'static str, &'static str)],
    body: &'static str,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut buf = [0u8; 2048];
                        let _ = socket.read(&mut buf).await;

                        let status_text = match status {
                            200 => "200 OK",
                            204 => "204 No Content",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let mut response = format!("HTTP/1.1 {}\r\n", status_text);
                        for (name, value) in headers {
                            response.push_str(&format!("{}: {}\r\n", name, value));
                        }
                        response.push_str(&format!(
                            "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        ));

                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing is listening on (bound once, then released).
#[allow(dead_code)]
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Test client that ignores any environment proxy settings.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
