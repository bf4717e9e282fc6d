//! End-to-end integration tests
//!
//! Verify the complete flow from extracted site metadata through the HTTP
//! API to the vendor request and back.

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::*;
use gateway_core::USER_PROMPT_PREFIX;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Site metadata is composed into the prompt the vendor receives
#[tokio::test]
async fn test_e2e_site_metadata_to_summary() {
    init_tracing();
    let mock = MockVendor::start(Vendor::OpenAI).await;
    mock.mock_summary(SAMPLE_SUMMARY).await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, body) = server
        .summarize(&site_summary_request("openai", "sk-caller"))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"summary": SAMPLE_SUMMARY}));

    let bodies = mock.request_bodies().await;
    assert_eq!(
        bodies[0]["messages"][1]["content"],
        json!(format!(
            "{USER_PROMPT_PREFIX}Title: Volume505\nDescription: Music production community\nContent: Share tracks and get feedback from producers.\n"
        ))
    );
}

/// Empty metadata fields are left out of the composed content
#[tokio::test]
async fn test_e2e_partial_site_metadata() {
    let mock = MockVendor::start(Vendor::Cohere).await;
    mock.mock_summary("ok").await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, _) = server
        .summarize(&json!({
            "site": {"title": "Volume505", "description": "", "mainContent": "Tracks"},
            "apiKey": "co-key",
            "aiService": "cohere"
        }))
        .await;
    assert_eq!(status, 200);

    let prompt = mock.request_bodies().await[0]["prompt"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.ends_with("Title: Volume505\nContent: Tracks\n"));
    assert!(!prompt.contains("Description:"));
}

/// Raw page text is cleaned and cut before it reaches the vendor
#[tokio::test]
async fn test_e2e_main_content_is_cleaned() {
    let mock = MockVendor::start(Vendor::OpenAI).await;
    mock.mock_summary("ok").await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let raw = format!("Menu\u{0007}\n\n  Tracks ^ {}", "y".repeat(2000));
    let (status, _) = server
        .summarize(&json!({
            "site": {"title": "Volume505", "mainContent": raw},
            "apiKey": "sk",
            "aiService": "openai"
        }))
        .await;
    assert_eq!(status, 200);

    let user = mock.request_bodies().await[0]["messages"][1]["content"]
        .as_str()
        .unwrap()
        .to_string();
    let excerpt = user
        .split("Content: ")
        .nth(1)
        .and_then(|rest| rest.strip_suffix('\n'))
        .unwrap();
    assert!(excerpt.starts_with("Menu Tracks y"));
    assert_eq!(excerpt.chars().count(), gateway_core::MAX_EXCERPT_CHARS);
}

/// Caller model and temperature reach the vendor
#[tokio::test]
async fn test_e2e_model_and_temperature_overrides() {
    let mock = MockVendor::start(Vendor::Claude).await;
    mock.mock_summary("ok").await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, _) = server
        .summarize(&json!({
            "content": sample_content(),
            "apiKey": "sk-ant",
            "aiService": "claude",
            "model": "claude-3-haiku-20240307",
            "temperature": 0.5
        }))
        .await;
    assert_eq!(status, 200);

    let body = &mock.request_bodies().await[0];
    assert_eq!(body["model"], "claude-3-haiku-20240307");
    assert_eq!(body["temperature"], 0.5);
}

/// Gemini receives the model in the path and the key in the query
#[tokio::test]
async fn test_e2e_gemini_request_shape() {
    let mock = MockVendor::start(Vendor::Gemini).await;
    mock.mock_summary("ok").await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, _) = server
        .summarize(&json!({
            "content": sample_content(),
            "apiKey": "gemini-key",
            "aiService": "gemini",
            "model": "gemini-1.5-pro"
        }))
        .await;
    assert_eq!(status, 200);

    let requests = mock.server.received_requests().await.unwrap();
    let url = &requests[0].url;
    assert_eq!(url.path(), "/v1beta/models/gemini-1.5-pro:generateContent");
    assert_eq!(
        url.query_pairs().find(|(k, _)| k == "key").map(|(_, v)| v.into_owned()),
        Some("gemini-key".to_string())
    );
    assert!(requests[0].headers.get("authorization").is_none());
}

/// The caller key wins over the server fallback key
#[tokio::test]
async fn test_e2e_caller_key_preferred_over_fallback() {
    let mock = MockVendor::start(Vendor::Perplexity).await;
    mock.mock_summary("ok").await;
    let server = TestServer::start(gateway_for(
        std::slice::from_ref(&mock),
        Some(("perplexity", "pplx-server")),
    ))
    .await;

    server
        .summarize(&summary_request("perplexity", "pplx-caller"))
        .await;
    server.summarize(&keyless_summary_request("perplexity")).await;
    server
        .summarize(&summary_request("perplexity", "   "))
        .await;

    let auth: Vec<String> = mock
        .server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.headers.get("authorization").unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        auth,
        vec![
            "Bearer pplx-caller".to_string(),
            "Bearer pplx-server".to_string(),
            "Bearer pplx-server".to_string(),
        ]
    );
}

/// A vendor answer without text still yields a summary
#[tokio::test]
async fn test_e2e_missing_text_fallback() {
    let mock = MockVendor::start(Vendor::Gemini).await;
    mock.mock_empty().await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, body) = server.summarize(&summary_request("gemini", "key")).await;
    assert_eq!(status, 200);
    assert_eq!(body["summary"], gateway_core::FALLBACK_SUMMARY);
}

/// Each request is dispatched exactly once, failures included
#[tokio::test]
async fn test_e2e_no_retry_on_failure() {
    let mock = MockVendor::start(Vendor::OpenAI).await;
    mock.mock_error(500, "boom").await;
    let server = TestServer::start(gateway_for(std::slice::from_ref(&mock), None)).await;

    let (status, body) = server.summarize(&summary_request("openai", "sk")).await;
    assert_eq!(status, 502);
    assert_error_message(&body, "boom");
    assert_eq!(mock.calls().await, 1);
}
