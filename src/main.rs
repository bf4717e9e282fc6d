//! # Site Summary Gateway
//!
//! HTTP gateway that turns extracted website content into a short Korean
//! analysis using the caller's choice of AI vendor.
//!
//! ## Features
//!
//! - Five vendors behind one request shape (OpenAI, Claude, Perplexity, Gemini, Cohere)
//! - Caller-supplied API keys with an optional server-side fallback key
//! - Uniform, user-facing error messages for vendor failures
//! - Prometheus metrics and structured logging
//!
//! ## Usage
//!
//! ```bash
//! # Start with default configuration
//! site-summary-gateway
//!
//! # Start with a config file
//! site-summary-gateway --config /path/to/gateway.yaml
//!
//! # Start with environment overrides
//! PORT=9000 PERPLEXITY_API_KEY=pplx-... site-summary-gateway
//! ```

use anyhow::Context;
use clap::Parser;
use gateway_config::{load_config, GatewayConfig, LogFormat, CONFIG_PATH_ENV};
use gateway_core::Temperature;
use gateway_providers::ProviderRegistry;
use gateway_routing::{FallbackCredential, RequestDefaults, SummaryGateway};
use gateway_server::{AppState, Server};
use gateway_telemetry::{init_logging, LoggingConfig, Metrics};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "site-summary-gateway", version, about)]
struct Args {
    /// Configuration file (YAML or TOML)
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Bind host, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Log format: pretty or json
    #[arg(long)]
    log_format: Option<LogFormat>,
}

/// Application entry point
#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!(error = %e, "Application failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())
        .await
        .context("failed to load configuration")?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }

    let logging = LoggingConfig::new()
        .with_level(config.logging.level.clone())
        .with_json(config.logging.format == LogFormat::Json);
    if let Err(e) = init_logging(&logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "Starting site summary gateway"
    );

    let registry = create_provider_registry(&config)?;
    if registry.is_empty() {
        warn!("No providers enabled; every summary request will be rejected");
    }
    info!(providers = ?registry.provider_ids(), "Provider registry initialized");

    let gateway = create_gateway(&config, registry);
    let metrics = Metrics::new().context("failed to register metrics")?;

    let state = AppState::new(config, gateway, metrics);
    Server::new(state)
        .run()
        .await
        .context("server failed")?;

    Ok(())
}

/// Build the registry from configuration
fn create_provider_registry(config: &GatewayConfig) -> anyhow::Result<ProviderRegistry> {
    let providers = &config.providers;

    let registry = ProviderRegistry::with_overrides(providers.timeout, |id, mut provider| {
        if let Some(url) = providers.base_urls.get(id) {
            provider = provider.with_base_url(url.clone());
        }
        if let Some(model) = providers.default_models.get(id) {
            provider = provider.with_default_model(model.clone());
        }
        provider
    })
    .context("failed to initialize providers")?;

    Ok(registry.retain(&providers.enabled))
}

/// Wire the registry, request defaults and fallback credential together
fn create_gateway(config: &GatewayConfig, registry: ProviderRegistry) -> SummaryGateway {
    let defaults = RequestDefaults {
        service: config.providers.default_service.clone(),
        temperature: Temperature::DEFAULT,
    };

    if !registry.contains(&defaults.service) {
        warn!(
            service = %defaults.service,
            "Default service is not enabled; requests without aiService will be rejected"
        );
    }

    let gateway = SummaryGateway::new(Arc::new(registry)).with_defaults(defaults);

    match config.fallback.resolve_key() {
        Some(key) => {
            info!(service = %config.fallback.service, "Server fallback credential configured");
            gateway.with_fallback(FallbackCredential::new(config.fallback.service.clone(), key))
        }
        None => gateway,
    }
}
