//! Provider integration tests
//!
//! Every adapter is driven through the registry against a mock of its
//! vendor API, checking the request it sends and how it reads the answer.

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::*;
use gateway_core::{
    ErrorCategory, GatewayError, PromptShape, Temperature, FALLBACK_SUMMARY, MAX_OUTPUT_TOKENS,
    SYSTEM_PROMPT,
};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{json, Value};

async fn call(mock: &MockVendor) -> Result<String, GatewayError> {
    let registry = registry_for(std::slice::from_ref(mock));
    let provider = registry.get(mock.vendor.id()).expect("provider registered");
    provider
        .call(
            &SecretString::new("test-key".to_string()),
            provider.default_model(),
            &sample_content(),
            Temperature::DEFAULT,
        )
        .await
}

fn upstream(err: GatewayError) -> (u16, ErrorCategory, String) {
    match err {
        GatewayError::Upstream { status, error } => (status, error.category, error.message),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_every_vendor_returns_its_summary() {
    init_tracing();

    for vendor in Vendor::ALL {
        let mock = MockVendor::start(vendor).await;
        mock.mock_summary(SAMPLE_SUMMARY).await;

        let summary = call(&mock).await.unwrap();
        assert_eq!(summary, SAMPLE_SUMMARY, "vendor {}", vendor.id());
        assert_eq!(mock.calls().await, 1);
    }
}

#[tokio::test]
async fn test_missing_text_falls_back() {
    for vendor in Vendor::ALL {
        let mock = MockVendor::start(vendor).await;
        mock.mock_empty().await;

        let summary = call(&mock).await.unwrap();
        assert_eq!(summary, FALLBACK_SUMMARY, "vendor {}", vendor.id());
    }
}

#[tokio::test]
async fn test_null_result_container_falls_back() {
    for vendor in Vendor::ALL {
        let mock = MockVendor::start(vendor).await;
        mock.mock_json(200, vendor.null_body()).await;

        let summary = call(&mock).await.unwrap();
        assert_eq!(summary, FALLBACK_SUMMARY, "vendor {}", vendor.id());
    }
}

#[tokio::test]
async fn test_unauthorized_names_the_service() {
    for vendor in Vendor::ALL {
        let mock = MockVendor::start(vendor).await;
        mock.mock_error(401, "Incorrect API key provided").await;

        let (status, category, message) = upstream(call(&mock).await.unwrap_err());
        assert_eq!(status, 401);
        assert_eq!(category, ErrorCategory::InvalidCredential);
        assert_eq!(
            message,
            format!(
                "API key invalid for {}. Check your settings.",
                vendor.display_name()
            )
        );
    }
}

#[tokio::test]
async fn test_rate_limit_ignores_vendor_message() {
    for vendor in Vendor::ALL {
        let mock = MockVendor::start(vendor).await;
        mock.mock_error(429, "You exceeded your current quota").await;

        let (status, category, message) = upstream(call(&mock).await.unwrap_err());
        assert_eq!(status, 429);
        assert_eq!(category, ErrorCategory::RateLimited);
        assert_eq!(message, "Request limit exceeded. Please retry later.");
    }
}

#[tokio::test]
async fn test_forbidden_names_the_service() {
    for vendor in Vendor::ALL {
        let mock = MockVendor::start(vendor).await;
        mock.mock_error(403, "forbidden").await;

        let (_, category, message) = upstream(call(&mock).await.unwrap_err());
        assert_eq!(category, ErrorCategory::InsufficientPermission);
        assert_eq!(
            message,
            format!("Insufficient permission on {} account.", vendor.display_name())
        );
    }
}

#[tokio::test]
async fn test_generic_error_uses_vendor_message() {
    for vendor in Vendor::ALL {
        let mock = MockVendor::start(vendor).await;
        mock.mock_error(400, "model not found").await;

        let (status, category, message) = upstream(call(&mock).await.unwrap_err());
        assert_eq!(status, 400);
        assert_eq!(category, ErrorCategory::Generic);
        assert_eq!(message, "model not found", "vendor {}", vendor.id());
    }
}

#[tokio::test]
async fn test_generic_error_without_message() {
    let mock = MockVendor::start(Vendor::Claude).await;
    mock.mock_raw(503, "<html>Service Unavailable</html>").await;

    let (status, category, message) = upstream(call(&mock).await.unwrap_err());
    assert_eq!(status, 503);
    assert_eq!(category, ErrorCategory::Generic);
    assert_eq!(message, "Claude API error: 503");
}

#[tokio::test]
async fn test_unreadable_success_body() {
    let mock = MockVendor::start(Vendor::Cohere).await;
    mock.mock_raw(200, "not json").await;

    let err = call(&mock).await.unwrap_err();
    assert_eq!(err.status_code(), 502);
    assert_eq!(err.user_message(), "Cohere API returned an unreadable response.");
}

#[tokio::test]
async fn test_unreachable_vendor() {
    let mock = MockVendor::start(Vendor::Gemini).await;
    let registry = registry_for(std::slice::from_ref(&mock));
    drop(mock);

    let provider = registry.get("gemini").unwrap();
    let err = provider
        .call(
            &SecretString::new("test-key".to_string()),
            "gemini-1.5-flash",
            "content",
            Temperature::DEFAULT,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Network { .. }));
    assert_eq!(err.user_message(), "Unable to reach the Gemini AI service.");
}

#[tokio::test]
async fn test_request_bodies_carry_prompt_contract() {
    let prompt = PromptShape::for_content(&sample_content());

    for vendor in Vendor::ALL {
        let mock = MockVendor::start(vendor).await;
        mock.mock_summary("ok").await;
        call(&mock).await.unwrap();

        let bodies = mock.request_bodies().await;
        let body = &bodies[0];
        let temperature = body_temperature(vendor, body);
        assert!((temperature - 0.1).abs() < 1e-6, "vendor {}", vendor.id());

        match vendor {
            Vendor::OpenAI | Vendor::Perplexity => {
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
                assert_eq!(body["messages"][1]["content"], json!(prompt.user));
                assert_eq!(body["max_tokens"], MAX_OUTPUT_TOKENS);
            }
            Vendor::Claude => {
                assert_eq!(body["messages"][0]["role"], "user");
                assert_eq!(body["messages"][0]["content"], json!(prompt.combined()));
                assert_eq!(body["max_tokens"], MAX_OUTPUT_TOKENS);
            }
            Vendor::Gemini => {
                assert_eq!(
                    body["contents"][0]["parts"][0]["text"],
                    json!(prompt.combined())
                );
                assert_eq!(
                    body["generationConfig"]["maxOutputTokens"],
                    MAX_OUTPUT_TOKENS
                );
            }
            Vendor::Cohere => {
                assert_eq!(body["prompt"], json!(prompt.combined()));
                assert_eq!(body["max_tokens"], MAX_OUTPUT_TOKENS);
            }
        }
    }
}

fn body_temperature(vendor: Vendor, body: &Value) -> f64 {
    let value = match vendor {
        Vendor::Gemini => &body["generationConfig"]["temperature"],
        _ => &body["temperature"],
    };
    value.as_f64().expect("temperature is a number")
}
