//! Perplexity adapter.
//!
//! Perplexity speaks the OpenAI chat-completions dialect on a different path
//! and expects `stream: false` to be sent explicitly.
//!
//! # API Format
//! `POST {base}/chat/completions` with `Authorization: Bearer <key>`

use crate::config::ProviderConfig;
use crate::http;
use crate::openai::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use gateway_core::{GatewayResult, PromptShape, SummaryProvider, Temperature};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

/// Default Perplexity API base URL
pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// Default Perplexity model
pub const PERPLEXITY_DEFAULT_MODEL: &str = "llama-3.1-sonar-small-128k-online";

/// Perplexity provider implementation
pub struct PerplexityProvider {
    config: ProviderConfig,
    client: Client,
}

impl PerplexityProvider {
    /// Service identifier
    pub const ID: &'static str = "perplexity";

    /// Create a new Perplexity provider
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let client = http::build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Configuration pointing at the public Perplexity API
    #[must_use]
    pub fn default_config() -> ProviderConfig {
        ProviderConfig::new(PERPLEXITY_BASE_URL, PERPLEXITY_DEFAULT_MODEL)
    }
}

#[async_trait]
impl SummaryProvider for PerplexityProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> &str {
        "Perplexity"
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
        let url = self.config.url("/chat/completions");
        let body = ChatCompletionRequest::new(model, &PromptShape::for_content(content), temperature)
            .without_streaming();

        debug!(provider = Self::ID, model = %model, url = %url, "Sending summary request");

        let request = self
            .client
            .post(&url)
            .bearer_auth(credential.expose_secret())
            .json(&body);

        http::execute(self.display_name(), request, ChatCompletionResponse::into_content)
            .await?
            .into_summary(self.display_name())
    }
}
