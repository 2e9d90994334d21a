//! Main crawl orchestration logic
//!
//! Coordinates same-origin site discovery with:
//! - A shared work queue fed by discovered links
//! - An atomic visited-set claim per URL
//! - A bounded pool of concurrent fetch tasks
//! - Durable logging of every claimed URL before its fetch
//! - Per-node abandonment that never fails the whole run

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashSet;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use log::{debug, error, info, warn};
use tokio::sync::{Mutex, Semaphore};
use url::Url;

use super::crawl_types::CrawlOutcome;
use super::fetcher::PageFetcher;
use super::link_extractor::{extract_links, is_same_origin};
use super::sitemap_log::SitemapLog;
use crate::config::ScrapeConfig;

/// Crawl every same-origin page reachable from the configured seed URL.
///
/// Each URL goes through `unvisited -> visiting -> recorded`: the atomic
/// `DashSet::insert` is the claim, the sitemap append happens before the
/// fetch (so the log reflects discovery even if the fetch later fails),
/// and discovered links are enqueued for other workers. URLs differing
/// only by fragment, query string, or trailing slash are distinct nodes
/// here; they collapse later, in normalization.
///
/// The crawl is complete only when the queue is empty and every in-flight
/// task has finished.
pub async fn crawl_site(
    config: &ScrapeConfig,
    fetcher: &PageFetcher,
    sitemap: &SitemapLog,
) -> Result<CrawlOutcome> {
    let seed = Url::parse(config.start_url())
        .with_context(|| format!("Invalid seed URL: {}", config.start_url()))?;
    let origin = seed.origin();

    // Thread-safe crawl queue, seeded with the parsed form of the start URL
    // so the seed and links resolving back to it share one key.
    let queue = Arc::new(Mutex::new({
        let mut q = VecDeque::new();
        q.push_back(seed.to_string());
        q
    }));

    // Lock-free visited set; insert() is the atomic check-and-claim.
    let visited: Arc<DashSet<String>> = Arc::new(DashSet::new());

    // Concurrency control
    let concurrency = config.max_concurrent_fetches();
    let semaphore = Arc::new(Semaphore::new(concurrency));

    let mut outcome = CrawlOutcome::default();
    let mut active_tasks = FuturesUnordered::new();

    loop {
        // Fill up to concurrency limit
        while active_tasks.len() < concurrency {
            let item = {
                let mut q = queue.lock().await;
                match q.pop_front() {
                    Some(item) => item,
                    None => break, // Wait for in-flight tasks (or finish)
                }
            };

            // Atomic claim; a loser observes the URL as already visited.
            if !visited.insert(item.clone()) {
                continue;
            }

            // Record discovery before any fetch work.
            sitemap.append(&item).await?;
            info!("Crawling: {item}");

            let page_url = match Url::parse(&item) {
                Ok(u) => u,
                Err(e) => {
                    warn!("Skipping unparseable URL {item}: {e}");
                    outcome.pages_abandoned += 1;
                    continue;
                }
            };

            let permit = match semaphore.clone().acquire_owned().await {
                Ok(p) => p,
                Err(_) => {
                    error!("Semaphore closed unexpectedly");
                    continue;
                }
            };

            let fetcher = fetcher.clone();
            let origin = origin.clone();

            let task = tokio::spawn(async move {
                let _permit = permit; // Hold until task completes

                let html = fetcher.fetch_with_retry(page_url.as_str()).await?;
                let links: Vec<String> = extract_links(&html, &page_url)
                    .into_iter()
                    .filter(|link| is_same_origin(link, &origin))
                    .map(|link| link.to_string())
                    .collect();
                Ok::<_, super::fetcher::FetchError>(links)
            });

            active_tasks.push(task);
        }

        // Wait for at least one task to complete
        match active_tasks.next().await {
            Some(Ok(Ok(links))) => {
                outcome.pages_fetched += 1;
                let mut q = queue.lock().await;
                for link in links {
                    // Cheap pre-filter; the insert at claim time stays the
                    // authoritative dedup.
                    if !visited.contains(&link) {
                        q.push_back(link);
                    }
                }
            }
            Some(Ok(Err(e))) => {
                outcome.pages_abandoned += 1;
                warn!("Abandoning node: {e}");
            }
            Some(Err(e)) => {
                outcome.pages_abandoned += 1;
                error!("Crawl task panicked: {e}");
            }
            None => break, // Queue drained and no tasks in flight
        }
    }

    outcome.pages_discovered = visited.len();
    debug!(
        "Crawl finished: {} discovered, {} fetched, {} abandoned",
        outcome.pages_discovered, outcome.pages_fetched, outcome.pages_abandoned
    );

    Ok(outcome)
}
