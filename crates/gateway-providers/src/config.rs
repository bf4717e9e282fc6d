//! Adapter configuration shared by every vendor.

use std::time::Duration;

/// Timeout applied to vendor calls unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Endpoint, default model and timeout of one adapter.
///
/// Credentials are not part of the configuration: they arrive with every
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Vendor base URL, without trailing path
    pub base_url: String,
    /// Model used when the request names none
    pub default_model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Create a configuration with the default timeout
    pub fn new(base_url: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_model: default_model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the adapter at a different base URL (proxies, mocks, compatible hosts)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join the base URL with an API path
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
