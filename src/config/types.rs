//! Core configuration types for scrape runs
//!
//! This module contains the main `ScrapeConfig` struct that defines the
//! parameters for one crawl-and-extract run.

use std::path::PathBuf;

use crate::extraction::ExtractionSettings;

/// Main configuration struct for a scrape run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Seed URL defining the crawl origin.
    ///
    /// **INVARIANT:** Always carries an explicit http/https scheme
    /// (injected in the builder when absent) and parses as a `url::Url`
    /// with a host.
    pub(crate) start_url: String,

    /// Output directory for the sitemap and product records. Defaults to
    /// the seed host name when not set explicitly.
    pub(crate) output_dir: PathBuf,

    /// Cap on simultaneously in-flight crawl fetches
    pub(crate) max_concurrent_fetches: usize,

    /// Per-request fetch timeout in seconds
    pub(crate) fetch_timeout_secs: u64,

    /// Attempts per crawl-path fetch when requests time out
    pub(crate) crawl_fetch_attempts: u32,

    /// Fixed delay in seconds between crawl-path timeout retries
    pub(crate) crawl_retry_delay_secs: u64,

    /// User-agent header sent with every fetch
    pub(crate) user_agent: String,

    /// Path substring that marks a product page
    pub(crate) product_path_marker: String,

    /// URLs per throttle batch in the extraction pipeline
    pub(crate) throttle_batch_size: usize,

    /// Pause in seconds after each full throttle batch
    pub(crate) throttle_pause_secs: u64,

    /// Extraction service settings (endpoint, credentials, retry policy)
    pub(crate) extraction: ExtractionSettings,
}
