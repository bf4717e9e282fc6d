//! # Gateway Telemetry
//!
//! Observability for the site summary gateway.
//!
//! This crate provides:
//! - Structured logging (human-readable or JSON) via `tracing-subscriber`
//! - Prometheus metrics for summary requests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;
pub mod metrics;

use thiserror::Error;

// Re-export main types
pub use logging::{init_logging, LoggingConfig};
pub use metrics::{Metrics, RequestOutcome};

/// Telemetry setup and export error
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The global subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),

    /// A metric could not be created or registered
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// The text exposition was not valid UTF-8
    #[error("Failed to encode metrics: {0}")]
    Encode(#[from] std::string::FromUtf8Error),
}
