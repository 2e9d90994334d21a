//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! The seed URL is the one required field; the builder will not expose
//! `build()` until it has been provided.

use std::marker::PhantomData;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, ensure};
use url::Url;

use super::types::ScrapeConfig;
use crate::extraction::{ExtractionSettings, RetryPolicy};

/// Fixed user-agent sent with every fetch.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 16;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CRAWL_FETCH_ATTEMPTS: u32 = 3;
const DEFAULT_CRAWL_RETRY_DELAY_SECS: u64 = 1;
const DEFAULT_PRODUCT_PATH_MARKER: &str = "/products/";
const DEFAULT_THROTTLE_BATCH_SIZE: usize = 15;
const DEFAULT_THROTTLE_PAUSE_SECS: u64 = 60;

// Type state for the builder
pub struct WithStartUrl;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) start_url: Option<String>,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) max_concurrent_fetches: usize,
    pub(crate) fetch_timeout_secs: u64,
    pub(crate) crawl_fetch_attempts: u32,
    pub(crate) crawl_retry_delay_secs: u64,
    pub(crate) user_agent: String,
    pub(crate) product_path_marker: String,
    pub(crate) throttle_batch_size: usize,
    pub(crate) throttle_pause_secs: u64,
    pub(crate) extraction: ExtractionSettings,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            start_url: None,
            output_dir: None,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            crawl_fetch_attempts: DEFAULT_CRAWL_FETCH_ATTEMPTS,
            crawl_retry_delay_secs: DEFAULT_CRAWL_RETRY_DELAY_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            product_path_marker: DEFAULT_PRODUCT_PATH_MARKER.to_string(),
            throttle_batch_size: DEFAULT_THROTTLE_BATCH_SIZE,
            throttle_pause_secs: DEFAULT_THROTTLE_PAUSE_SECS,
            extraction: ExtractionSettings::default(),
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    /// Set the seed URL. A bare host is accepted; `http://` is injected at
    /// build time when no scheme is present.
    pub fn start_url(self, url: impl Into<String>) -> ScrapeConfigBuilder<WithStartUrl> {
        ScrapeConfigBuilder {
            start_url: Some(url.into()),
            output_dir: self.output_dir,
            max_concurrent_fetches: self.max_concurrent_fetches,
            fetch_timeout_secs: self.fetch_timeout_secs,
            crawl_fetch_attempts: self.crawl_fetch_attempts,
            crawl_retry_delay_secs: self.crawl_retry_delay_secs,
            user_agent: self.user_agent,
            product_path_marker: self.product_path_marker,
            throttle_batch_size: self.throttle_batch_size,
            throttle_pause_secs: self.throttle_pause_secs,
            extraction: self.extraction,
            _phantom: PhantomData,
        }
    }
}

impl<State> ScrapeConfigBuilder<State> {
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    #[must_use]
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn crawl_fetch_attempts(mut self, attempts: u32) -> Self {
        self.crawl_fetch_attempts = attempts;
        self
    }

    #[must_use]
    pub fn crawl_retry_delay_secs(mut self, secs: u64) -> Self {
        self.crawl_retry_delay_secs = secs;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn product_path_marker(mut self, marker: impl Into<String>) -> Self {
        self.product_path_marker = marker.into();
        self
    }

    #[must_use]
    pub fn throttle(mut self, batch_size: usize, pause_secs: u64) -> Self {
        self.throttle_batch_size = batch_size;
        self.throttle_pause_secs = pause_secs;
        self
    }

    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.extraction.api_key = key.into();
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.extraction.model = model.into();
        self
    }

    #[must_use]
    pub fn extraction_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.extraction.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.extraction.retry = policy;
        self
    }
}

impl ScrapeConfigBuilder<WithStartUrl> {
    /// Validate and assemble the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the seed URL does not parse, is not http(s),
    /// or has no host.
    pub fn build(self) -> Result<ScrapeConfig> {
        let raw = self
            .start_url
            .ok_or_else(|| anyhow!("start_url missing despite builder state"))?;

        let mut start_url = raw.trim().to_string();
        if !start_url.contains("://") {
            start_url = format!("http://{start_url}");
        }

        let parsed =
            Url::parse(&start_url).with_context(|| format!("Invalid seed URL: {raw}"))?;
        ensure!(
            matches!(parsed.scheme(), "http" | "https"),
            "Seed URL scheme must be http or https, got {}",
            parsed.scheme()
        );
        let host = parsed
            .host_str()
            .ok_or_else(|| anyhow!("Seed URL has no host: {raw}"))?;

        let output_dir = self.output_dir.unwrap_or_else(|| PathBuf::from(host));

        Ok(ScrapeConfig {
            start_url,
            output_dir,
            max_concurrent_fetches: self.max_concurrent_fetches.max(1),
            fetch_timeout_secs: self.fetch_timeout_secs,
            crawl_fetch_attempts: self.crawl_fetch_attempts.max(1),
            crawl_retry_delay_secs: self.crawl_retry_delay_secs,
            user_agent: self.user_agent,
            product_path_marker: self.product_path_marker,
            throttle_batch_size: self.throttle_batch_size,
            throttle_pause_secs: self.throttle_pause_secs,
            extraction: self.extraction,
        })
    }
}
