//! Test fixtures and sample data for integration tests

use gateway_core::SiteContent;
use serde_json::{json, Value};

/// Summary text in the shape the prompt asks for
pub const SAMPLE_SUMMARY: &str =
    "## 개요\nVolume505는 음악 제작 커뮤니티입니다.\n\n## 주요 기능\n- 트랙 공유\n- 피드백";

/// Site metadata as the browser extractor hands it over
pub fn sample_site() -> SiteContent {
    SiteContent::new(
        "Volume505",
        "Music production community",
        "Share tracks and get feedback from producers.",
    )
}

/// Composed content for [`sample_site`]
pub fn sample_content() -> String {
    sample_site().compose()
}

/// Summary request body with pre-composed content
pub fn summary_request(service: &str, api_key: &str) -> Value {
    json!({
        "content": sample_content(),
        "apiKey": api_key,
        "aiService": service
    })
}

/// Summary request body without a caller key
pub fn keyless_summary_request(service: &str) -> Value {
    json!({
        "content": sample_content(),
        "aiService": service
    })
}

/// Summary request body carrying site metadata instead of content
pub fn site_summary_request(service: &str, api_key: &str) -> Value {
    json!({
        "site": sample_site(),
        "apiKey": api_key,
        "aiService": service
    })
}
