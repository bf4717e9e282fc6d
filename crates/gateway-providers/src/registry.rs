//! Provider registry.
//!
//! Maps service identifiers to adapters. The registry is assembled once at
//! startup and shared read-only afterwards.

use crate::config::ProviderConfig;
use gateway_core::{GatewayError, GatewayResult, ProviderInfo, SummaryProvider};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Registry of summarization adapters keyed by service id
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn SummaryProvider>>,
    /// Registration order, used for listings
    order: Vec<String>,
}

impl ProviderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every adapter compiled into this crate, each pointed
    /// at its public vendor endpoint.
    ///
    /// # Errors
    /// Returns error if an adapter cannot build its HTTP client
    pub fn with_defaults(timeout: Duration) -> GatewayResult<Self> {
        Self::with_overrides(timeout, |_, config| config)
    }

    /// Like [`with_defaults`](Self::with_defaults), letting the caller adjust
    /// each adapter's configuration before it is built.
    ///
    /// # Errors
    /// Returns error if an adapter cannot build its HTTP client
    #[allow(unused_mut, unused_variables)]
    pub fn with_overrides<F>(timeout: Duration, adjust: F) -> GatewayResult<Self>
    where
        F: Fn(&str, ProviderConfig) -> ProviderConfig,
    {
        let mut registry = Self::new();
        let configure = |id: &str, config: ProviderConfig| adjust(id, config.with_timeout(timeout));

        #[cfg(feature = "openai")]
        {
            use crate::openai::OpenAIProvider;
            let config = configure(OpenAIProvider::ID, OpenAIProvider::default_config());
            registry.register(Arc::new(OpenAIProvider::new(config)?))?;
        }

        #[cfg(feature = "anthropic")]
        {
            use crate::anthropic::AnthropicProvider;
            let config = configure(AnthropicProvider::ID, AnthropicProvider::default_config());
            registry.register(Arc::new(AnthropicProvider::new(config)?))?;
        }

        #[cfg(feature = "perplexity")]
        {
            use crate::perplexity::PerplexityProvider;
            let config = configure(PerplexityProvider::ID, PerplexityProvider::default_config());
            registry.register(Arc::new(PerplexityProvider::new(config)?))?;
        }

        #[cfg(feature = "google")]
        {
            use crate::google::GoogleProvider;
            let config = configure(GoogleProvider::ID, GoogleProvider::default_config());
            registry.register(Arc::new(GoogleProvider::new(config)?))?;
        }

        #[cfg(feature = "cohere")]
        {
            use crate::cohere::CohereProvider;
            let config = configure(CohereProvider::ID, CohereProvider::default_config());
            registry.register(Arc::new(CohereProvider::new(config)?))?;
        }

        Ok(registry)
    }

    /// Register an adapter under its service id.
    ///
    /// # Errors
    /// Returns a configuration error if the id is already registered
    pub fn register(&mut self, provider: Arc<dyn SummaryProvider>) -> GatewayResult<()> {
        let id = provider.id().to_string();
        if self.providers.contains_key(&id) {
            return Err(GatewayError::configuration(format!(
                "Provider '{id}' is already registered"
            )));
        }

        debug!(provider = %id, base_url = provider.base_url(), "Registered provider");
        self.order.push(id.clone());
        self.providers.insert(id, provider);
        Ok(())
    }

    /// Keep only the listed service ids
    #[must_use]
    pub fn retain(mut self, enabled: &[String]) -> Self {
        self.providers.retain(|id, _| enabled.contains(id));
        self.order.retain(|id| enabled.contains(id));
        self
    }

    /// Look up an adapter
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn SummaryProvider>> {
        self.providers.get(id).cloned()
    }

    /// Whether an adapter is registered for `id`
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    /// Number of registered adapters
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Registered service ids in registration order
    #[must_use]
    pub fn provider_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Public descriptions in registration order
    #[must_use]
    pub fn infos(&self) -> Vec<ProviderInfo> {
        self.order
            .iter()
            .filter_map(|id| self.providers.get(id))
            .map(|provider| provider.info())
            .collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.order)
            .finish()
    }
}
