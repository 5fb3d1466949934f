//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the bank factory.

mod handlers;
mod request;
mod server;

pub use handlers::{ApiError, ApiJson, AppState};
pub use request::HttpRequestContext;
pub use server::HttpServer;
