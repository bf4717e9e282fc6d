//! Error types for the summary gateway.
//!
//! Every failure a summarization request can hit is represented by
//! [`GatewayError`]. Vendor HTTP failures carry a [`NormalizedError`] so that
//! callers never see raw vendor payloads.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result alias used across the gateway crates
pub type GatewayResult<T> = Result<T, GatewayError>;

/// User-facing error categories shared by every vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The vendor rejected the credential (HTTP 401)
    InvalidCredential,
    /// The vendor rate limit was hit (HTTP 429)
    RateLimited,
    /// The credential lacks permission (HTTP 403)
    InsufficientPermission,
    /// The requested service is not registered
    UnknownService,
    /// Any other vendor failure
    Generic,
}

impl ErrorCategory {
    /// Stable label used in logs and metrics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid_credential",
            Self::RateLimited => "rate_limited",
            Self::InsufficientPermission => "insufficient_permission",
            Self::UnknownService => "unknown_service",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vendor-agnostic error category plus the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedError {
    /// Error category
    pub category: ErrorCategory,
    /// User-facing message
    pub message: String,
}

impl NormalizedError {
    /// Create a normalized error
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for NormalizedError {}

/// Gateway error type
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// No usable credential, or the server is misconfigured
    #[error("{message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// The incoming request is malformed
    #[error("{message}")]
    InvalidRequest {
        /// Error message
        message: String,
    },

    /// The requested service has no registered adapter
    #[error("Unsupported AI service.")]
    UnknownService {
        /// The service identifier that was requested
        service: String,
    },

    /// The vendor answered with a non-2xx status
    #[error("{error}")]
    Upstream {
        /// Vendor HTTP status
        status: u16,
        /// Normalized error derived from the status and payload
        error: NormalizedError,
    },

    /// The vendor could not be reached
    #[error("{message}")]
    Network {
        /// Display name of the service
        service: String,
        /// Error message
        message: String,
        /// Whether the call ran into the configured timeout
        timed_out: bool,
    },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal {
        /// Error message
        message: String,
    },
}

impl GatewayError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an unknown service error
    pub fn unknown_service(service: impl Into<String>) -> Self {
        Self::UnknownService {
            service: service.into(),
        }
    }

    /// Create an upstream error from an already normalized vendor failure
    #[must_use]
    pub fn upstream(status: u16, error: NormalizedError) -> Self {
        Self::Upstream { status, error }
    }

    /// Create a network error for a service that could not be reached
    pub fn network(service: impl Into<String>, timed_out: bool) -> Self {
        let service = service.into();
        let message = if timed_out {
            format!("The {service} AI service did not respond in time.")
        } else {
            format!("Unable to reach the {service} AI service.")
        };
        Self::Network {
            service,
            message,
            timed_out,
        }
    }

    /// Create an error for a 2xx vendor body that could not be decoded
    pub fn unreadable_response(service: &str, status: u16) -> Self {
        Self::Upstream {
            status,
            error: NormalizedError::new(
                ErrorCategory::Generic,
                format!("{service} API returned an unreadable response."),
            ),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Normalized category, for errors that belong to the user-facing taxonomy
    #[must_use]
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::UnknownService { .. } => Some(ErrorCategory::UnknownService),
            Self::Upstream { error, .. } => Some(error.category),
            _ => None,
        }
    }

    /// Short label for logs and metrics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::UnknownService { .. } => ErrorCategory::UnknownService.as_str(),
            Self::Upstream { error, .. } => error.category.as_str(),
            Self::Network { .. } => "network",
            Self::Internal { .. } => "internal",
        }
    }

    /// HTTP status code to answer the caller with
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } | Self::UnknownService { .. } => 400,
            Self::Upstream { error, .. } => match error.category {
                ErrorCategory::InvalidCredential => 401,
                ErrorCategory::InsufficientPermission => 403,
                ErrorCategory::RateLimited => 429,
                ErrorCategory::UnknownService => 400,
                ErrorCategory::Generic => 502,
            },
            Self::Network { timed_out: true, .. } => 504,
            Self::Network { .. } => 502,
            Self::Configuration { .. } | Self::Internal { .. } => 500,
        }
    }

    /// Message shown to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
