//! Per-request resolution of defaults.
//!
//! Service, model and temperature defaults are applied in one place so that
//! adapters always receive fully specified calls.

use gateway_core::{GatewayError, GatewayResult, SummarizationRequest, SummaryProvider, Temperature};
use gateway_providers::ProviderRegistry;
use std::sync::Arc;

/// Service used when the request names none
pub const DEFAULT_SERVICE: &str = "openai";

/// Defaults applied to requests that leave fields unset
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDefaults {
    /// Service id
    pub service: String,
    /// Sampling temperature
    pub temperature: Temperature,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            temperature: Temperature::DEFAULT,
        }
    }
}

impl RequestDefaults {
    /// Service id the request resolves to, before registry lookup
    #[must_use]
    pub fn service_for<'a>(&'a self, request: &'a SummarizationRequest) -> &'a str {
        request
            .ai_service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.service)
    }

    /// Validate `request` and fill in every unset field.
    ///
    /// # Errors
    /// - [`GatewayError::InvalidRequest`] for empty content or an out-of-range temperature
    /// - [`GatewayError::UnknownService`] when no adapter is registered for the service
    pub fn resolve(
        &self,
        request: &SummarizationRequest,
        registry: &ProviderRegistry,
    ) -> GatewayResult<ResolvedRequest> {
        let content = request.effective_content();
        if content.trim().is_empty() {
            return Err(GatewayError::invalid_request("Content to summarize is required."));
        }

        let temperature = request
            .temperature
            .map(Temperature::new)
            .transpose()?
            .unwrap_or(self.temperature);

        let service = self.service_for(request);
        let provider = registry
            .get(service)
            .ok_or_else(|| GatewayError::unknown_service(service))?;

        let model = request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| provider.default_model())
            .to_string();

        Ok(ResolvedRequest {
            service: provider.id().to_string(),
            provider,
            model,
            temperature,
            content,
        })
    }
}

/// A request with every default applied and its adapter selected
pub struct ResolvedRequest {
    /// Service id
    pub service: String,
    /// Adapter serving the request
    pub provider: Arc<dyn SummaryProvider>,
    /// Model passed to the vendor
    pub model: String,
    /// Sampling temperature
    pub temperature: Temperature,
    /// Prompt body
    pub content: String,
}

impl std::fmt::Debug for ResolvedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedRequest")
            .field("service", &self.service)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("content_len", &self.content.len())
            .finish_non_exhaustive()
    }
}
