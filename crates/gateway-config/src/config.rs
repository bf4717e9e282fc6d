//! Configuration types.

use crate::error::{ConfigError, ConfigResult};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server settings
    #[validate(nested)]
    pub server: ServerConfig,

    /// Vendor adapter settings
    #[validate(nested)]
    pub providers: ProvidersConfig,

    /// Server-side fallback credential
    #[validate(nested)]
    pub fallback: FallbackConfig,

    /// Logging settings
    #[validate(nested)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Run field validation plus the checks derive rules cannot express
    ///
    /// # Errors
    /// Returns [`ConfigError::Validation`] describing the first problem found
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.validate()?;

        for origin in &self.server.allowed_origins {
            check_origin(origin)?;
        }
        for (service, base_url) in &self.providers.base_urls {
            check_http_url(&format!("providers.base_urls.{service}"), base_url)?;
        }
        if self.providers.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "providers.timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_http_url(field: &str, value: &str) -> ConfigResult<()> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{field}: {value:?} is not an http(s) URL"
        ))),
    }
}

/// An allowed origin must equal its own `scheme://host[:port]` serialization
fn check_origin(value: &str) -> ConfigResult<()> {
    check_http_url("server.allowed_origins", value)?;
    match Url::parse(value) {
        Ok(url) if url.origin().ascii_serialization() == value => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "server.allowed_origins: {value:?} must be scheme://host[:port] without path, query or trailing slash"
        ))),
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    #[validate(length(min = 1))]
    pub host: String,

    /// Listen port
    #[validate(range(min = 1))]
    pub port: u16,

    /// Public domain reported by the health check
    pub domain: String,

    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,

    /// Maximum JSON body size
    #[validate(range(min = 1024))]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            domain: "www.volume505.com".to_string(),
            allowed_origins: vec![
                "https://www.volume505.com".to_string(),
                "https://volume505.com".to_string(),
                "http://localhost:3000".to_string(),
            ],
            body_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Vendor adapter settings
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Timeout of each vendor call
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Service used when a request names none
    #[validate(length(min = 1))]
    pub default_service: String,

    /// Services exposed by the gateway
    #[validate(length(min = 1))]
    pub enabled: Vec<String>,

    /// Base URL overrides keyed by service id
    pub base_urls: HashMap<String, String>,

    /// Default model overrides keyed by service id
    pub default_models: HashMap<String, String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            default_service: "openai".to_string(),
            enabled: ["openai", "claude", "perplexity", "gemini", "cohere"]
                .into_iter()
                .map(String::from)
                .collect(),
            base_urls: HashMap::new(),
            default_models: HashMap::new(),
        }
    }
}

/// Server-side fallback credential settings
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct FallbackConfig {
    /// Service the credential may be used for
    #[validate(length(min = 1))]
    pub service: String,

    /// Environment variable holding the credential
    pub api_key_env: String,

    /// Inline credential, preferred over the environment variable
    pub api_key: Option<SecretString>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            service: "perplexity".to_string(),
            api_key_env: "PERPLEXITY_API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl FallbackConfig {
    /// The credential, from the inline value or the environment.
    ///
    /// Blank values count as absent.
    #[must_use]
    pub fn resolve_key(&self) -> Option<SecretString> {
        self.resolve_key_with(|var| std::env::var(var).ok())
    }

    pub(crate) fn resolve_key_with<F>(&self, lookup: F) -> Option<SecretString>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = self
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
        {
            return Some(key.clone());
        }

        if self.api_key_env.is_empty() {
            return None;
        }
        lookup(&self.api_key_env)
            .filter(|value| !value.trim().is_empty())
            .map(SecretString::new)
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter, overridden by `RUST_LOG`
    #[validate(length(min = 1))]
    pub level: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}
