//! Same-origin site crawler with LLM-backed product data extraction.
//!
//! Two stages share one run: the crawl discovers every same-origin page
//! reachable from a seed URL and records them in a durable sitemap log,
//! then the pipeline feeds the normalized product-page subset through an
//! external text-understanding service and persists one JSON record per
//! product.

pub mod config;
pub mod crawl_engine;
pub mod extraction;
pub mod pipeline;
pub mod sanitizer;

pub use config::ScrapeConfig;
pub use crawl_engine::{
    CrawlOutcome, FetchError, PageFetcher, ScrapeError, ScrapeResult, SitemapLog, crawl_site,
    normalize_and_sort, normalize_url,
};
pub use extraction::{
    ExtractionClient, ExtractionError, ExtractionSettings, RetryPolicy, retry_with_backoff,
};
pub use pipeline::{BatchThrottle, PipelineSummary, process_product_urls, select_product_urls};
pub use sanitizer::{reduce_html, sanitize_html};

use anyhow::{Context, Result};
use log::info;
use url::Url;

/// Name of the sitemap file inside the output directory.
pub const SITEMAP_FILE: &str = "full_sitemap.txt";

/// Execute a full run: crawl, normalize the sitemap, then extract and
/// persist product records.
pub async fn run(config: ScrapeConfig) -> ScrapeResult<()> {
    run_impl(&config).await.map_err(ScrapeError::from)
}

async fn run_impl(config: &ScrapeConfig) -> Result<()> {
    tokio::fs::create_dir_all(config.output_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output_dir().display()
            )
        })?;

    let fetcher = PageFetcher::new(
        config.user_agent(),
        config.fetch_timeout(),
        config.crawl_fetch_attempts(),
        config.crawl_retry_delay(),
    )?;

    info!("Starting to crawl from: {}", config.start_url());
    let sitemap = SitemapLog::create(&config.output_dir().join(SITEMAP_FILE)).await?;
    let outcome = crawl_site(config, &fetcher, &sitemap).await?;
    info!(
        "Crawling completed: {} URLs discovered ({} fetched, {} abandoned). Sorting URLs...",
        outcome.pages_discovered, outcome.pages_fetched, outcome.pages_abandoned
    );

    let normalized = sitemap.finalize().await?;
    info!(
        "All internal links have been saved and sorted in {}",
        sitemap.path().display()
    );
    info!("Total unique URLs found: {}", normalized.len());

    let seed = Url::parse(config.start_url()).context("Seed URL stopped parsing after crawl")?;
    let product_urls =
        select_product_urls(&normalized, config.product_path_marker(), seed.scheme());
    info!("Found {} unique product URLs. Processing...", product_urls.len());

    let client = ExtractionClient::new(config.extraction().clone())?;
    let mut throttle = BatchThrottle::new(config.throttle_batch_size(), config.throttle_pause());
    let summary = process_product_urls(
        &product_urls,
        config.output_dir(),
        &fetcher,
        &client,
        &mut throttle,
    )
    .await?;

    info!(
        "Finished processing product URLs: {} saved, {} skipped, {} failed, {} artifacts",
        summary.saved, summary.skipped, summary.failed, summary.artifacts
    );

    Ok(())
}
