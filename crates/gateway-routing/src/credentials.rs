//! Server-side fallback credential.

use secrecy::{ExposeSecret, SecretString};

/// A credential held by the server for exactly one service.
///
/// It is only handed out when the request resolves to that service and the
/// caller supplied no key of their own.
#[derive(Clone)]
pub struct FallbackCredential {
    service: String,
    key: SecretString,
}

impl FallbackCredential {
    /// Create a fallback credential for `service`
    pub fn new(service: impl Into<String>, key: SecretString) -> Self {
        Self {
            service: service.into(),
            key,
        }
    }

    /// Service this credential belongs to
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The credential, if `service` is the one it is configured for
    #[must_use]
    pub fn for_service(&self, service: &str) -> Option<&SecretString> {
        (self.service == service && !self.key.expose_secret().is_empty()).then_some(&self.key)
    }
}

impl std::fmt::Debug for FallbackCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackCredential")
            .field("service", &self.service)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
