//! # Gateway Server
//!
//! HTTP server for the site summary gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - `POST /api/summary`, `GET /api/providers`, `GET /health`, `GET /metrics`
//! - CORS, compression, body limit, request-id and tracing middleware
//! - Graceful shutdown on SIGINT/SIGTERM

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod state;

// Re-export main types
pub use error::ApiError;
pub use routes::create_router;
pub use server::Server;
pub use shutdown::shutdown_signal;
pub use state::AppState;
