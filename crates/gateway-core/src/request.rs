//! Request and response types for the summary endpoint.
//!
//! Field names follow the JSON contract of `POST /api/summary`
//! (`content`, `apiKey`, `aiService`, `model`, `temperature`).

use crate::prompt::SiteContent;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// A summarization request as sent by the client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizationRequest {
    /// Pre-composed prompt body
    #[serde(default)]
    pub content: String,

    /// Extracted site metadata, composed into `content` when that is empty
    #[serde(default)]
    pub site: Option<SiteContent>,

    /// Caller-supplied vendor credential
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Service identifier (`openai`, `claude`, `perplexity`, `gemini`, `cohere`)
    #[serde(default, alias = "service")]
    pub ai_service: Option<String>,

    /// Vendor model identifier
    #[serde(default)]
    pub model: Option<String>,

    /// Sampling temperature in `[0, 1]`
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl SummarizationRequest {
    /// Create a request for pre-composed content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Create a request from extracted site metadata
    #[must_use]
    pub fn from_site(site: SiteContent) -> Self {
        Self {
            site: Some(site),
            ..Self::default()
        }
    }

    /// Set the caller credential
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    /// Set the service identifier
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.ai_service = Some(service.into());
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Content to summarize: `content` if present, otherwise the composed site
    #[must_use]
    pub fn effective_content(&self) -> String {
        if !self.content.trim().is_empty() {
            return self.content.clone();
        }
        self.site
            .as_ref()
            .map(SiteContent::compose)
            .unwrap_or_default()
    }
}

/// Successful summary response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Markdown summary produced by the vendor
    pub summary: String,
}
