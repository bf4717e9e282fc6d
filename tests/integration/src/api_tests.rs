//! API endpoint integration tests
//!
//! The full server runs on a local socket with every vendor mocked.

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::*;
use gateway_config::GatewayConfig;
use gateway_telemetry::RequestOutcome;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Test the health check endpoint
#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::start(gateway_for(&[], None)).await;

    let response = server.get("/health").await;
    assert_status(&response, 200);

    let body = TestServer::json_body(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["domain"], "www.volume505.com");
    assert!(body["timestamp"].is_string());
}

/// Test listing providers
#[tokio::test]
async fn test_list_providers() {
    let server = TestServer::start(gateway_for(&[], None)).await;

    let response = server.get("/api/providers").await;
    assert_status(&response, 200);

    let body = TestServer::json_body(response).await;
    let ids: Vec<&str> = body["providers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["openai", "claude", "perplexity", "gemini", "cohere"]);
}

/// Every service answers through the same endpoint and response shape
#[tokio::test]
async fn test_summary_for_every_service() {
    let mocks = start_all_vendors().await;
    for mock in &mocks {
        mock.mock_summary(&format!("summary from {}", mock.vendor.id()))
            .await;
    }
    let server = TestServer::start(gateway_for(&mocks, None)).await;

    for vendor in Vendor::ALL {
        let (status, body) = server.summarize(&summary_request(vendor.id(), "key")).await;
        assert_eq!(status, 200, "vendor {}", vendor.id());
        assert_eq!(body, json!({"summary": format!("summary from {}", vendor.id())}));
    }

    for mock in &mocks {
        assert_eq!(mock.calls().await, 1, "vendor {}", mock.vendor.id());
    }
}

/// Omitted service resolves to openai
#[tokio::test]
async fn test_default_service() {
    let mock = MockVendor::start(Vendor::OpenAI).await;
    mock.mock_summary(SAMPLE_SUMMARY).await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, body) = server
        .summarize(&json!({"content": sample_content(), "apiKey": "sk"}))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["summary"], SAMPLE_SUMMARY);
    assert_eq!(mock.calls().await, 1);
}

/// Unknown services are rejected before any vendor is contacted
#[tokio::test]
async fn test_unknown_service() {
    let mocks = start_all_vendors().await;
    let server = TestServer::start(gateway_for(&mocks, Some(("perplexity", "pplx")))).await;

    for service in ["mistral", "OpenAI"] {
        let (status, body) = server.summarize(&summary_request(service, "key")).await;
        assert_eq!(status, 400);
        assert_error_message(&body, "Unsupported AI service.");
    }

    for mock in &mocks {
        assert_eq!(mock.calls().await, 0);
    }
}

/// Missing credentials produce a configuration error naming the vendor
#[tokio::test]
async fn test_missing_credential() {
    let mock = MockVendor::start(Vendor::Claude).await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, body) = server.summarize(&keyless_summary_request("claude")).await;

    assert_eq!(status, 500);
    assert_error_message(
        &body,
        "Claude API key not found. Please add your API key in settings.",
    );
    assert_eq!(mock.calls().await, 0);
}

/// The server key serves its own service only
#[tokio::test]
async fn test_fallback_credential_scope() {
    let mocks = start_all_vendors().await;
    for mock in &mocks {
        mock.mock_summary("ok").await;
    }
    let server = TestServer::start(gateway_for(&mocks, Some(("perplexity", "pplx-server")))).await;

    let (status, _) = server.summarize(&keyless_summary_request("perplexity")).await;
    assert_eq!(status, 200);

    for vendor in [Vendor::OpenAI, Vendor::Claude, Vendor::Gemini, Vendor::Cohere] {
        let (status, _) = server.summarize(&keyless_summary_request(vendor.id())).await;
        assert_eq!(status, 500, "vendor {}", vendor.id());
    }

    let calls: Vec<usize> = call_counts(&mocks).await;
    assert_eq!(calls, vec![0, 0, 1, 0, 0]);
}

async fn call_counts(mocks: &[MockVendor]) -> Vec<usize> {
    let mut calls = Vec::with_capacity(mocks.len());
    for mock in mocks {
        calls.push(mock.calls().await);
    }
    calls
}

/// Vendor failures map onto HTTP statuses
#[tokio::test]
async fn test_vendor_error_statuses() {
    let cases = [
        (401, 401, "API key invalid for Gemini. Check your settings."),
        (403, 403, "Insufficient permission on Gemini account."),
        (429, 429, "Request limit exceeded. Please retry later."),
        (404, 502, "models/unknown is not found"),
    ];

    for (vendor_status, expected_status, message) in cases {
        let mock = MockVendor::start(Vendor::Gemini).await;
        mock.mock_error(vendor_status, "models/unknown is not found")
            .await;
        let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

        let (status, body) = server.summarize(&summary_request("gemini", "key")).await;
        assert_eq!(status, expected_status, "vendor status {vendor_status}");
        assert_error_message(&body, message);
    }
}

/// Invalid bodies are rejected with an error body
#[tokio::test]
async fn test_invalid_requests() {
    let mock = MockVendor::start(Vendor::OpenAI).await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let response = server
        .client
        .post(server.url("/api/summary"))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_status(&response, 400);

    let (status, _) = server
        .summarize(&json!({"content": "", "apiKey": "sk"}))
        .await;
    assert_eq!(status, 400);

    let (status, _) = server
        .summarize(&json!({"content": "x", "apiKey": "sk", "temperature": -0.5}))
        .await;
    assert_eq!(status, 400);

    assert_eq!(mock.calls().await, 0);
}

/// CORS preflight from an allowed origin
#[tokio::test]
async fn test_cors_preflight() {
    let server = TestServer::start(gateway_for(&[], None)).await;

    let response = server
        .client
        .request(reqwest::Method::OPTIONS, server.url("/api/summary"))
        .header("Origin", "https://volume505.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://volume505.com"
    );
}

/// Bodies above the configured limit are refused
#[tokio::test]
async fn test_body_limit() {
    let mut config = GatewayConfig::default();
    config.server.body_limit_bytes = 2048;
    let server = TestServer::with_config(config, gateway_for(&[], None)).await;

    let response = server
        .post_json(
            "/api/summary",
            &json!({"content": "a".repeat(8192), "apiKey": "sk"}),
        )
        .await;
    assert_status(&response, 413);
}

/// Metrics count outcomes per service
#[tokio::test]
async fn test_metrics_recorded() {
    let mock = MockVendor::start(Vendor::Cohere).await;
    mock.mock_error(429, "slow down").await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, _) = server.summarize(&summary_request("cohere", "key")).await;
    assert_eq!(status, 429);

    assert_eq!(
        server
            .state
            .metrics
            .request_count("cohere", RequestOutcome::Failure("rate_limited")),
        1
    );

    let response = server.get("/metrics").await;
    assert_status(&response, 200);
    let text = response.text().await.unwrap();
    assert!(text.contains("summary_requests_total"));
}
