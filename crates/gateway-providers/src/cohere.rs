//! Cohere generate adapter.
//!
//! # API Format
//! `POST {base}/v1/generate` with `Authorization: Bearer <key>`

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

/// Default Cohere API base URL
pub const COHERE_BASE_URL: &str = "https://api.cohere.ai";

/// Default Cohere model
pub const COHERE_DEFAULT_MODEL: &str = "command";

/// Cohere provider implementation
pub struct CohereProvider {
    config: ProviderConfig,
    client: Client,
}

impl CohereProvider {
    /// Service identifier
    pub const ID: &'static str = "cohere";

    /// Create a new Cohere provider
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let client = http::build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Configuration pointing at the public Cohere API
    #[must_use]
    pub fn default_config() -> ProviderConfig {
        ProviderConfig::new(COHERE_BASE_URL, COHERE_DEFAULT_MODEL)
    }
}

#[async_trait]
impl SummaryProvider for CohereProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> &str {
        "Cohere"
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
        let url = self.config.url("/v1/generate");
        let body = GenerateRequest {
            model: model.to_string(),
            prompt: PromptShape::for_content(content).combined(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: temperature.value(),
        };

        debug!(provider = Self::ID, model = %model, url = %url, "Sending summary request");

        let request = self
            .client
            .post(&url)
            .bearer_auth(credential.expose_secret())
            .json(&body);

        http::execute(self.display_name(), request, GenerateResponse::into_text)
            .await?
            .into_summary(self.display_name())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default, deserialize_with = "http::null_as_default")]
    generations: Vec<Generation>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.generations.into_iter().next().and_then(|g| g.text)
    }
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    text: Option<String>,
}
