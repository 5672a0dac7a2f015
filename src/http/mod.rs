//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, method dispatch)
//!     → cors.rs (OPTIONS: fixed preflight response)
//!     → forward.rs (GET: extract target, outbound fetch)
//!     → relayed response (upstream status/body, CORS headers overwritten)
//!     → Send to client
//! ```

pub mod cors;
pub mod forward;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
