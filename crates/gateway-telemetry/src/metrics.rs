//! Prometheus metrics for summary requests.
//!
//! Each [`Metrics`] owns its own registry so tests can create isolated
//! instances.

use crate::TelemetryError;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Vendor latency buckets (seconds), up to the default 60s timeout
const SUMMARY_LATENCY_BUCKETS: &[f64] = &[0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 45.0, 60.0];

/// How a summary request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A summary was returned
    Success,
    /// An error was returned; the label is the error kind
    Failure(&'static str),
}

impl RequestOutcome {
    /// Label value for the `outcome` dimension
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure(kind) => kind,
        }
    }
}

/// Summary gateway metrics
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
}

impl Metrics {
    /// Create and register all metrics
    ///
    /// # Errors
    /// Returns error if a metric cannot be created or registered
    pub fn new() -> Result<Self, TelemetryError> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("summary_requests_total", "Total summary requests"),
            &["service", "outcome"],
        )?;
        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "summary_request_duration_seconds",
                "Summary request duration in seconds",
            )
            .buckets(SUMMARY_LATENCY_BUCKETS.to_vec()),
            &["service"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
        })
    }

    /// Record one finished summary request
    pub fn record(&self, service: &str, outcome: RequestOutcome, elapsed: Duration) {
        self.requests_total
            .with_label_values(&[service, outcome.as_str()])
            .inc();
        self.request_duration_seconds
            .with_label_values(&[service])
            .observe(elapsed.as_secs_f64());
    }

    /// Number of requests recorded for a service and outcome
    #[must_use]
    pub fn request_count(&self, service: &str, outcome: RequestOutcome) -> u64 {
        self.requests_total
            .with_label_values(&[service, outcome.as_str()])
            .get()
    }

    /// Prometheus text exposition of every metric
    ///
    /// # Errors
    /// Returns error if encoding fails
    pub fn gather(&self) -> Result<String, TelemetryError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Content type of [`gather`](Self::gather) output
    #[must_use]
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}
