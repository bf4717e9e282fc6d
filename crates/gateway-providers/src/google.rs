//! Google Gemini provider implementation.
//!
//! Uses the Google AI Studio `generateContent` API. The system and user
//! instructions are sent as one concatenated user turn.
//!
//! # API Format
//! `POST {base}/v1beta/models/{MODEL}:generateContent?key={API_KEY}`

use crate::config::ProviderConfig;
use crate::http;
use async_trait::async_trait;
use gateway_core::{
    GatewayError, GatewayResult, PromptShape, SummaryProvider, Temperature, MAX_OUTPUT_TOKENS,
};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Google AI Studio base URL
pub const GOOGLE_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Google Gemini provider implementation
pub struct GoogleProvider {
    config: ProviderConfig,
    client: Client,
}

impl GoogleProvider {
    /// Service identifier
    pub const ID: &'static str = "gemini";

    /// Create a new Gemini provider
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let client = http::build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Configuration pointing at Google AI Studio
    #[must_use]
    pub fn default_config() -> ProviderConfig {
        ProviderConfig::new(GOOGLE_AI_BASE_URL, GEMINI_DEFAULT_MODEL)
    }

    /// Build the endpoint URL for a model, without the credential.
    ///
    /// The model is pushed as a single percent-encoded path segment.
    fn endpoint_url(&self, model: &str) -> GatewayResult<Url> {
        let mut url = Url::parse(&self.config.url("/v1beta/models"))
            .map_err(|e| GatewayError::configuration(format!("Invalid Gemini base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| GatewayError::configuration("Gemini base URL cannot take a path"))?
            .push(&format!("{model}:generateContent"));
        Ok(url)
    }
}

#[async_trait]
impl SummaryProvider for GoogleProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> &str {
        "Gemini"
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
        let url = self.endpoint_url(model)?;
        let body = GoogleRequest::new(&PromptShape::for_content(content), temperature);

        debug!(provider = Self::ID, model = %model, url = %url, "Sending summary request");

        let request = self
            .client
            .post(url)
            .query(&[("key", credential.expose_secret().as_str())])
            .json(&body);

        http::execute(self.display_name(), request, GoogleResponse::into_text)
            .await?
            .into_summary(self.display_name())
    }
}

// Google API Types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleRequest {
    contents: Vec<GoogleContent>,
    generation_config: GoogleGenerationConfig,
}

impl GoogleRequest {
    fn new(prompt: &PromptShape, temperature: Temperature) -> Self {
        Self {
            contents: vec![GoogleContent {
                role: Some("user".to_string()),
                parts: vec![GooglePart {
                    text: Some(prompt.combined()),
                }],
            }],
            generation_config: GoogleGenerationConfig {
                temperature: temperature.value(),
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GoogleContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default, deserialize_with = "http::null_as_default")]
    parts: Vec<GooglePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GooglePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GoogleResponse {
    #[serde(default, deserialize_with = "http::null_as_default")]
    candidates: Vec<GoogleCandidate>,
}

impl GoogleResponse {
    /// `candidates[0].content.parts[0].text`
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
    }
}

#[derive(Debug, Deserialize)]
struct GoogleCandidate {
    #[serde(default)]
    content: Option<GoogleContent>,
}
