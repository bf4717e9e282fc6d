//! Vendor error normalization.
//!
//! Vendors disagree on the shape of their error bodies, so the status code
//! decides the category first and the payload is only consulted for the
//! generic case.

use crate::error::{ErrorCategory, NormalizedError};
use serde_json::Value;

/// Maps vendor HTTP failures onto the user-facing error taxonomy
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorNormalizer;

impl ErrorNormalizer {
    /// Normalize a vendor failure.
    ///
    /// `service` is the display name of the vendor and is embedded in the
    /// message where the user needs to know which account to fix.
    #[must_use]
    pub fn normalize(status: u16, service: &str, payload: &Value) -> NormalizedError {
        match status {
            401 => NormalizedError::new(
                ErrorCategory::InvalidCredential,
                format!("API key invalid for {service}. Check your settings."),
            ),
            429 => NormalizedError::new(
                ErrorCategory::RateLimited,
                "Request limit exceeded. Please retry later.",
            ),
            403 => NormalizedError::new(
                ErrorCategory::InsufficientPermission,
                format!("Insufficient permission on {service} account."),
            ),
            _ => NormalizedError::new(
                ErrorCategory::Generic,
                Self::vendor_message(payload)
                    .unwrap_or_else(|| format!("{service} API error: {status}")),
            ),
        }
    }

    /// Pull the first non-blank of `error.message` and `message` out of a
    /// vendor payload
    fn vendor_message(payload: &Value) -> Option<String> {
        ["/error/message", "/message"]
            .into_iter()
            .filter_map(|pointer| payload.pointer(pointer).and_then(Value::as_str))
            .find(|m| !m.trim().is_empty())
            .map(str::to_string)
    }
}
