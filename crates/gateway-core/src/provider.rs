//! Provider abstraction.
//!
//! A provider adapter turns the canonical summarization call into one vendor
//! HTTP request and turns the vendor answer back into a summary string.

use crate::error::{GatewayError, GatewayResult};
use crate::normalize::ErrorNormalizer;
use crate::types::Temperature;
use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Summary returned when the vendor answered successfully without content
pub const FALLBACK_SUMMARY: &str = "Summary could not be generated.";

/// A summarization backend for one LLM vendor
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Service identifier used in requests (e.g. `openai`)
    fn id(&self) -> &str;

    /// Human-readable vendor name used in error messages
    fn display_name(&self) -> &str;

    /// Model used when the request does not name one
    fn default_model(&self) -> &str;

    /// Base URL of the vendor API
    fn base_url(&self) -> &str;

    /// Timeout applied to the vendor call
    fn timeout(&self) -> Duration;

    /// Summarize `content` with the given credential and parameters.
    ///
    /// # Errors
    /// Returns [`GatewayError::Upstream`] when the vendor answers with a
    /// non-2xx status and [`GatewayError::Network`] when it cannot be reached.
    async fn call(
        &self,
        credential: &SecretString,
        model: &str,
        content: &str,
        temperature: Temperature,
    ) -> GatewayResult<String>;

    /// Public description of this provider
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: self.id().to_string(),
            name: self.display_name().to_string(),
            default_model: self.default_model().to_string(),
        }
    }
}

/// Public description of a registered provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Service identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Default model
    pub default_model: String,
}

/// Outcome of a single vendor round trip
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCallResult {
    /// The vendor answered with a 2xx status
    Success {
        /// Extracted summary text
        summary_text: String,
    },
    /// The vendor answered with a non-2xx status
    Failure {
        /// Vendor HTTP status
        http_status: u16,
        /// Parsed vendor error body, or an empty object
        vendor_payload: Value,
    },
}

impl ProviderCallResult {
    /// Build a success from the extracted content field.
    ///
    /// A missing or empty field yields [`FALLBACK_SUMMARY`].
    #[must_use]
    pub fn success(extracted: Option<String>) -> Self {
        let summary_text = extracted
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string());
        Self::Success { summary_text }
    }

    /// Build a failure from a raw vendor error body.
    ///
    /// Bodies that are not JSON are replaced by an empty object.
    #[must_use]
    pub fn failure(http_status: u16, body: &str) -> Self {
        let vendor_payload = serde_json::from_str::<Value>(body)
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::Failure {
            http_status,
            vendor_payload,
        }
    }

    /// Consume the result, normalizing failures for the named service
    pub fn into_summary(self, service: &str) -> GatewayResult<String> {
        match self {
            Self::Success { summary_text } => Ok(summary_text),
            Self::Failure {
                http_status,
                vendor_payload,
            } => Err(GatewayError::upstream(
                http_status,
                ErrorNormalizer::normalize(http_status, service, &vendor_payload),
            )),
        }
    }
}
