//! The summary gateway.
//!
//! Validates a [`SummarizationRequest`], resolves its defaults, picks the
//! credential and dispatches one call to the selected adapter. Failures are
//! returned as [`GatewayError`] values; nothing is retried.

use crate::credentials::FallbackCredential;
use crate::resolution::{RequestDefaults, ResolvedRequest};
use gateway_core::{GatewayError, GatewayResult, SummarizationRequest, SummaryResponse};
use gateway_providers::ProviderRegistry;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Metrics label for requests naming an unregistered service
pub const UNKNOWN_SERVICE_LABEL: &str = "unknown";

/// Entry point for summarization requests
#[derive(Debug, Clone)]
pub struct SummaryGateway {
    registry: Arc<ProviderRegistry>,
    defaults: RequestDefaults,
    fallback: Option<FallbackCredential>,
}

impl SummaryGateway {
    /// Create a gateway over `registry` with the standard defaults and no
    /// fallback credential
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            defaults: RequestDefaults::default(),
            fallback: None,
        }
    }

    /// Replace the request defaults
    #[must_use]
    pub fn with_defaults(mut self, defaults: RequestDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Install a server-side fallback credential
    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackCredential) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// The adapters this gateway dispatches to
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Service the fallback credential is configured for, if any
    #[must_use]
    pub fn fallback_service(&self) -> Option<&str> {
        self.fallback.as_ref().map(FallbackCredential::service)
    }

    /// Bounded label for the service a request targets: its registered id,
    /// or [`UNKNOWN_SERVICE_LABEL`]
    #[must_use]
    pub fn service_label<'a>(&'a self, request: &'a SummarizationRequest) -> &'a str {
        let service = self.defaults.service_for(request);
        if self.registry.contains(service) {
            service
        } else {
            UNKNOWN_SERVICE_LABEL
        }
    }

    /// Summarize the request with exactly one vendor call.
    ///
    /// # Errors
    /// - [`GatewayError::InvalidRequest`] / [`GatewayError::UnknownService`]
    ///   before any dispatch
    /// - [`GatewayError::Configuration`] when neither the caller nor the
    ///   server holds a credential for the resolved service
    /// - [`GatewayError::Upstream`] / [`GatewayError::Network`] from the adapter
    #[instrument(skip_all, fields(service = tracing::field::Empty, model = tracing::field::Empty))]
    pub async fn summarize(&self, request: &SummarizationRequest) -> GatewayResult<SummaryResponse> {
        let resolved = self.defaults.resolve(request, &self.registry).map_err(|e| {
            debug!(error_kind = e.kind(), "Request rejected before dispatch");
            e
        })?;

        let span = tracing::Span::current();
        span.record("service", resolved.service.as_str());
        span.record("model", resolved.model.as_str());

        let credential = self.credential_for(request, &resolved)?;
        self.dispatch(&resolved, credential).await
    }

    fn credential_for<'a>(
        &'a self,
        request: &'a SummarizationRequest,
        resolved: &ResolvedRequest,
    ) -> GatewayResult<&'a SecretString> {
        if let Some(key) = request
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
        {
            return Ok(key);
        }

        if let Some(key) = self
            .fallback
            .as_ref()
            .and_then(|fallback| fallback.for_service(&resolved.service))
        {
            debug!("Using server fallback credential");
            return Ok(key);
        }

        warn!("No credential available");
        Err(GatewayError::configuration(format!(
            "{} API key not found. Please add your API key in settings.",
            resolved.provider.display_name()
        )))
    }

    async fn dispatch(
        &self,
        resolved: &ResolvedRequest,
        credential: &SecretString,
    ) -> GatewayResult<SummaryResponse> {
        let started = Instant::now();
        let result = resolved
            .provider
            .call(
                credential,
                &resolved.model,
                &resolved.content,
                resolved.temperature,
            )
            .await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(summary) => {
                info!(latency_ms, summary_len = summary.len(), "Summary generated");
                Ok(SummaryResponse { summary })
            }
            Err(e) => {
                warn!(
                    latency_ms,
                    error_kind = e.kind(),
                    status = e.status_code(),
                    "Summary request failed"
                );
                Err(e)
            }
        }
    }
}
