//! # Gateway Routing
//!
//! Request resolution and dispatch for the site summary gateway.
//!
//! This crate provides:
//! - Per-request resolution of service, model and temperature defaults
//! - The server-side fallback credential
//! - [`SummaryGateway`], which validates a request, selects the adapter by
//!   service id and invokes it exactly once

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credentials;
pub mod gateway;
pub mod resolution;

// Re-export main types
pub use credentials::FallbackCredential;
pub use gateway::{SummaryGateway, UNKNOWN_SERVICE_LABEL};
pub use resolution::{RequestDefaults, ResolvedRequest, DEFAULT_SERVICE};
