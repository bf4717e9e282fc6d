//! HTTP request handlers for the gateway API.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};
use gateway_core::{ProviderInfo, SummarizationRequest, SummaryResponse};
use gateway_telemetry::RequestOutcome;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    extractors::{JsonBody, RequestId},
    state::AppState,
};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `OK` while the process serves requests
    pub status: &'static str,
    /// Public domain of the deployment
    pub domain: String,
    /// Server version
    pub version: &'static str,
    /// Current time, RFC 3339 with milliseconds
    pub timestamp: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        domain: state.config.server.domain.clone(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Registered providers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvidersResponse {
    /// Providers in registration order
    pub providers: Vec<ProviderInfo>,
    /// Service used when a request names none
    pub default_service: String,
}

/// List the services the gateway can dispatch to
pub async fn list_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.gateway.registry().infos(),
        default_service: state.config.providers.default_service.clone(),
    })
}

/// Metrics endpoint (Prometheus format)
pub async fn metrics_endpoint(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .gather()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, state.metrics.content_type())], body))
}

/// Summarize site content with the requested provider
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn summarize(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    JsonBody(request): JsonBody<SummarizationRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let started = Instant::now();
    let service = state.gateway.service_label(&request).to_string();

    debug!(
        service = %service,
        has_api_key = request.api_key.is_some(),
        "Processing summary request"
    );

    let result = state.gateway.summarize(&request).await;

    let outcome = match &result {
        Ok(_) => RequestOutcome::Success,
        Err(e) => RequestOutcome::Failure(e.kind()),
    };
    state.metrics.record(&service, outcome, started.elapsed());

    result.map(Json).map_err(ApiError::from)
}
