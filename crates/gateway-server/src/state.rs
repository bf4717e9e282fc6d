//! Shared application state.

use gateway_config::GatewayConfig;
use gateway_routing::SummaryGateway;
use gateway_telemetry::Metrics;
use std::sync::Arc;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<GatewayConfig>,
    /// Summarization entry point
    pub gateway: Arc<SummaryGateway>,
    /// Request metrics
    pub metrics: Metrics,
}

impl AppState {
    /// Create the application state
    #[must_use]
    pub fn new(config: GatewayConfig, gateway: SummaryGateway, metrics: Metrics) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            metrics,
        }
    }
}
