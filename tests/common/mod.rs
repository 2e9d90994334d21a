//! Test utilities and helper functions for the storescrape test suite

use std::time::Duration;

use anyhow::Result;
use storescrape::{ExtractionClient, ExtractionSettings, PageFetcher, RetryPolicy};
use tempfile::TempDir;

/// Creates a temporary directory for test output
#[allow(dead_code)]
pub fn create_test_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test HTML document with the specified body content
#[allow(dead_code)]
pub fn page_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// Creates a page whose body is just a list of links
#[allow(dead_code)]
pub fn links_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{href}">{href}</a>"#))
        .collect();
    page_html("links", &links)
}

/// Body of a successful chat-completions response carrying `content`
#[allow(dead_code)]
pub fn chat_response_body(content: &str) -> String {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
    .to_string()
}

/// A retry policy with millisecond delays so tests never dawdle
#[allow(dead_code)]
pub fn fast_retry_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        min_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        max_attempts,
    }
}

/// A fetcher with short timeouts suitable for mockito servers
#[allow(dead_code)]
pub fn test_fetcher() -> Result<PageFetcher> {
    PageFetcher::new(
        "Mozilla/5.0",
        Duration::from_secs(5),
        3,
        Duration::from_millis(10),
    )
}

/// An extraction client pointed at a mockito endpoint
#[allow(dead_code)]
pub fn test_client(endpoint: &str, max_attempts: u32) -> Result<ExtractionClient> {
    ExtractionClient::new(ExtractionSettings {
        endpoint: endpoint.to_string(),
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        retry: fast_retry_policy(max_attempts),
        ..ExtractionSettings::default()
    })
}
