//! CORS Pass-Through Proxy Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
