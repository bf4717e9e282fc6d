//! Integration tests for the site summary gateway
//!
//! This crate covers:
//! - Every vendor adapter against a wiremock stand-in of its API
//! - The HTTP API served on a real socket
//! - End-to-end flows from site metadata to the summary returned

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::*;
pub use helpers::*;
pub use mock_providers::*;

#[cfg(test)]
mod api_tests;
#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod provider_tests;
