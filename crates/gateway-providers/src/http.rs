//! HTTP plumbing shared by the adapters.

use gateway_core::{GatewayError, GatewayResult, ProviderCallResult};
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, trace, warn};

/// Build the HTTP client used by one adapter
pub(crate) fn build_client(timeout: Duration) -> GatewayResult<Client> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(16)
        .build()
        .map_err(|e| GatewayError::internal(format!("Failed to create HTTP client: {e}")))
}

/// Read an explicit JSON `null` the same way as an absent field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Send a vendor request and classify the answer.
///
/// Non-2xx answers become [`ProviderCallResult::Failure`]; 2xx bodies are
/// decoded as `T` and handed to `extract` for the summary text.
pub(crate) async fn execute<T, F>(
    service: &str,
    request: RequestBuilder,
    extract: F,
) -> GatewayResult<ProviderCallResult>
where
    T: DeserializeOwned,
    F: FnOnce(T) -> Option<String>,
{
    let response = request.send().await.map_err(|e| {
        // The URL may carry a query-string credential
        let e = e.without_url();
        error!(provider = service, error = %e, "Vendor request failed");
        GatewayError::network(service, e.is_timeout())
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        let e = e.without_url();
        error!(provider = service, error = %e, "Failed to read vendor response");
        GatewayError::network(service, e.is_timeout())
    })?;

    trace!(provider = service, status = %status, bytes = body.len(), "Received vendor response");

    if !status.is_success() {
        warn!(provider = service, status = status.as_u16(), "Vendor returned an error status");
        return Ok(ProviderCallResult::failure(status.as_u16(), &body));
    }

    let parsed: T = serde_json::from_str(&body).map_err(|e| {
        warn!(provider = service, error = %e, "Vendor returned invalid JSON");
        GatewayError::unreadable_response(service, status.as_u16())
    })?;

    Ok(ProviderCallResult::success(extract(parsed)))
}
