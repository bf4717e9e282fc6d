//! Validated domain types.

use crate::error::GatewayError;
use serde::Serialize;
use std::fmt;

/// Sampling temperature, guaranteed to be finite and within `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Temperature(f32);

impl Temperature {
    /// Temperature used when the request does not specify one
    pub const DEFAULT: Self = Self(0.1);

    /// Create a validated temperature
    ///
    /// # Errors
    /// Returns an invalid request error when the value is outside `[0, 1]`
    pub fn new(value: f32) -> Result<Self, GatewayError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GatewayError::invalid_request(format!(
                "temperature must be between 0 and 1, got {value}"
            )))
        }
    }

    /// Raw value
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
