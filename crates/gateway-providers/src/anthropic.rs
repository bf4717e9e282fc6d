//! Anthropic Messages API adapter.
//!
//! The system and user instructions are sent as one concatenated user turn.
//!
//! # API Format
//! `POST {base}/v1/messages` with `x-api-key` and `anthropic-version` headers

use crate::config::ProviderConfig;
use crate::http;
use async_trait::async_trait;
use gateway_core::{
    GatewayResult, PromptShape, SummaryProvider, Temperature, MAX_OUTPUT_TOKENS,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Anthropic API base URL
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Default Claude model
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// Anthropic API version header value
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Anthropic provider implementation
pub struct AnthropicProvider {
    config: ProviderConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Service identifier
    pub const ID: &'static str = "claude";

    /// Create a new Anthropic provider
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let client = http::build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Configuration pointing at the public Anthropic API
    #[must_use]
    pub fn default_config() -> ProviderConfig {
        ProviderConfig::new(ANTHROPIC_BASE_URL, ANTHROPIC_DEFAULT_MODEL)
    }
}

#[async_trait]
impl SummaryProvider for AnthropicProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> &str {
        "Claude"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }

    async fn call(
        &self,
        credential: &SecretString,
        model: &str,
        content: &str,
        temperature: Temperature,
    ) -> GatewayResult<String> {
        let url = self.config.url("/v1/messages");
        let body = MessagesRequest::new(model, &PromptShape::for_content(content), temperature);

        debug!(provider = Self::ID, model = %model, url = %url, "Sending summary request");

        let request = self
            .client
            .post(&url)
            .header("x-api-key", credential.expose_secret())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&body);

        http::execute(self.display_name(), request, MessagesResponse::into_text)
            .await?
            .into_summary(self.display_name())
    }
}

// Anthropic API Types

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<AnthropicMessage>,
}

impl MessagesRequest {
    fn new(model: &str, prompt: &PromptShape, temperature: Temperature) -> Self {
        Self {
            model: model.to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: temperature.value(),
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt.combined(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct MessagesResponse {
    #[serde(default, deserialize_with = "http::null_as_default")]
    content: Vec<AnthropicContentBlock>,
}

impl MessagesResponse {
    /// `content[0].text`
    fn into_text(self) -> Option<String> {
        self.content.into_iter().next().and_then(|block| block.text)
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(default)]
    text: Option<String>,
}
