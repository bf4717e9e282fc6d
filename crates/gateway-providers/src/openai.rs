//! OpenAI chat completions adapter.
//!
//! The chat-completions wire types are shared with other OpenAI-compatible
//! vendors (Perplexity).
//!
//! # API Format
//! `POST {base}/v1/chat/completions` with `Authorization: Bearer <key>`

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

/// Default OpenAI API base URL
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default OpenAI model
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI provider implementation
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Service identifier
    pub const ID: &'static str = "openai";

    /// Create a new OpenAI provider
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let client = http::build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Configuration pointing at the public OpenAI API
    #[must_use]
    pub fn default_config() -> ProviderConfig {
        ProviderConfig::new(OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL)
    }

    fn endpoint_url(&self) -> String {
        self.config.url("/v1/chat/completions")
    }
}

#[async_trait]
impl SummaryProvider for OpenAIProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> &str {
        "OpenAI"
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
        let url = self.endpoint_url();
        let body = ChatCompletionRequest::new(model, &PromptShape::for_content(content), temperature);

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

// Chat completions wire types

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

impl ChatCompletionRequest {
    /// System and user instructions as separate roles
    pub(crate) fn new(model: &str, prompt: &PromptShape, temperature: Temperature) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt.system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.user.clone(),
                },
            ],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: temperature.value(),
            stream: None,
        }
    }

    /// Explicitly request a non-streamed answer
    #[must_use]
    pub(crate) fn without_streaming(mut self) -> Self {
        self.stream = Some(false);
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default, deserialize_with = "http::null_as_default")]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`
    pub(crate) fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
