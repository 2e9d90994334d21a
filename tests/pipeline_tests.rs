//! Product pipeline tests: persistence, skipping, fallback, artifacts

mod common;

use std::time::Duration;

use common::{chat_response_body, create_test_dir, page_html, test_client, test_fetcher};
use mockito::Matcher;
use storescrape::{BatchThrottle, process_product_urls, select_product_urls};

fn throttle() -> BatchThrottle {
    BatchThrottle::new(15, Duration::from_millis(1))
}

#[tokio::test]
async fn saves_record_with_injected_url_and_fences_stripped() {
    let mut server = mockito::Server::new_async().await;
    let endpoint = format!("{}/v1/chat/completions", server.url());
    let product_url = format!("{}/products/boot", server.url());

    let page = server
        .mock("GET", "/products/boot")
        .with_status(200)
        .with_body(page_html("boot", "<h1>Boot</h1><p>$120</p>"))
        .expect(1)
        .create_async()
        .await;
    let chat = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(chat_response_body(
            "```json\n{\"name\": \"Boot\", \"price\": \"$120\"}\n```",
        ))
        .expect(1)
        .create_async()
        .await;

    let dir = create_test_dir().expect("tempdir");
    let fetcher = test_fetcher().expect("fetcher");
    let client = test_client(&endpoint, 3).expect("client");

    let summary = process_product_urls(
        &[product_url.clone()],
        dir.path(),
        &fetcher,
        &client,
        &mut throttle(),
    )
    .await
    .expect("pipeline");

    page.assert_async().await;
    chat.assert_async().await;
    assert_eq!(summary.saved, 1);

    let record_path = dir.path().join("boot.json");
    let raw = tokio::fs::read_to_string(&record_path).await.expect("record");
    let record: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(record["name"], "Boot");
    assert_eq!(record["price"], "$120");
    assert_eq!(record["url"], product_url.as_str());
}

#[tokio::test]
async fn existing_record_skips_url_without_fetch_or_extraction() {
    let mut server = mockito::Server::new_async().await;
    let endpoint = format!("{}/v1/chat/completions", server.url());
    let product_url = format!("{}/products/boot", server.url());

    let page = server
        .mock("GET", "/products/boot")
        .expect(0)
        .create_async()
        .await;
    let chat = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let dir = create_test_dir().expect("tempdir");
    tokio::fs::write(dir.path().join("boot.json"), "{}")
        .await
        .expect("pre-existing record");

    let fetcher = test_fetcher().expect("fetcher");
    let client = test_client(&endpoint, 3).expect("client");

    let summary = process_product_urls(
        &[product_url],
        dir.path(),
        &fetcher,
        &client,
        &mut throttle(),
    )
    .await
    .expect("pipeline");

    page.assert_async().await;
    chat.assert_async().await;
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.saved, 0);
}

#[tokio::test]
async fn unparseable_response_becomes_failure_artifact() {
    let mut server = mockito::Server::new_async().await;
    let endpoint = format!("{}/v1/chat/completions", server.url());
    let product_url = format!("{}/products/boot", server.url());

    server
        .mock("GET", "/products/boot")
        .with_status(200)
        .with_body(page_html("boot", "<h1>Boot</h1>"))
        .create_async()
        .await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(chat_response_body("Sorry, the page had no product data."))
        .create_async()
        .await;

    let dir = create_test_dir().expect("tempdir");
    let fetcher = test_fetcher().expect("fetcher");
    let client = test_client(&endpoint, 3).expect("client");

    let summary = process_product_urls(
        &[product_url.clone()],
        dir.path(),
        &fetcher,
        &client,
        &mut throttle(),
    )
    .await
    .expect("pipeline");

    assert_eq!(summary.artifacts, 1);
    assert_eq!(summary.saved, 0);

    assert!(!dir.path().join("boot.json").exists());
    let artifact = tokio::fs::read_to_string(dir.path().join("boot.json.txt"))
        .await
        .expect("artifact");
    assert!(artifact.starts_with(&format!("URL: {product_url}")));
    assert!(artifact.contains("Sorry, the page had no product data."));
}

#[tokio::test]
async fn too_large_prompt_retries_once_with_reduced_content() {
    let mut server = mockito::Server::new_async().await;
    let endpoint = format!("{}/v1/chat/completions", server.url());
    let product_url = format!("{}/products/boot", server.url());

    server
        .mock("GET", "/products/boot")
        .with_status(200)
        .with_body(page_html(
            "boot",
            "<header>huge chrome</header><h1>Boot</h1>",
        ))
        .create_async()
        .await;

    // The standard prompt mentions the annotation scheme; the fallback
    // prompt mentions the reduced content. Disjoint matchers let one
    // route serve both phases.
    let first = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex("Some sections are marked".to_string()))
        .with_status(400)
        .with_body(r#"{"error":{"code":"context_length_exceeded"}}"#)
        .expect(1)
        .create_async()
        .await;
    let fallback = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex("reduced HTML content".to_string()))
        .with_status(200)
        .with_body(chat_response_body("{\"name\": \"Boot\"}"))
        .expect(1)
        .create_async()
        .await;

    let dir = create_test_dir().expect("tempdir");
    let fetcher = test_fetcher().expect("fetcher");
    let client = test_client(&endpoint, 4).expect("client");

    let summary = process_product_urls(
        &[product_url],
        dir.path(),
        &fetcher,
        &client,
        &mut throttle(),
    )
    .await
    .expect("pipeline");

    first.assert_async().await;
    fallback.assert_async().await;
    assert_eq!(summary.saved, 1);

    let raw = tokio::fs::read_to_string(dir.path().join("boot.json"))
        .await
        .expect("record");
    let record: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(record["name"], "Boot");
}

#[tokio::test]
async fn failed_product_fetch_moves_on_without_extraction() {
    let mut server = mockito::Server::new_async().await;
    let endpoint = format!("{}/v1/chat/completions", server.url());

    server
        .mock("GET", "/products/gone")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let ok_page = server
        .mock("GET", "/products/boot")
        .with_status(200)
        .with_body(page_html("boot", "<h1>Boot</h1>"))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(chat_response_body("{\"name\": \"Boot\"}"))
        .expect(1)
        .create_async()
        .await;

    let dir = create_test_dir().expect("tempdir");
    let fetcher = test_fetcher().expect("fetcher");
    let client = test_client(&endpoint, 3).expect("client");

    let urls = vec![
        format!("{}/products/gone", server.url()),
        format!("{}/products/boot", server.url()),
    ];
    let summary = process_product_urls(&urls, dir.path(), &fetcher, &client, &mut throttle())
        .await
        .expect("pipeline");

    ok_page.assert_async().await;
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.saved, 1);
}

#[test]
fn product_selection_filters_and_restores_scheme() {
    let normalized = vec![
        "example.com".to_string(),
        "example.com/about".to_string(),
        "example.com/products/a".to_string(),
        "example.com/products/b".to_string(),
    ];
    let urls = select_product_urls(&normalized, "/products/", "http");
    assert_eq!(
        urls,
        vec![
            "http://example.com/products/a",
            "http://example.com/products/b",
        ]
    );
}
