//! Read accessors for `ScrapeConfig`.

use std::path::Path;
use std::time::Duration;

use super::types::ScrapeConfig;
use crate::extraction::ExtractionSettings;

impl ScrapeConfig {
    #[must_use]
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn crawl_fetch_attempts(&self) -> u32 {
        self.crawl_fetch_attempts
    }

    #[must_use]
    pub fn crawl_retry_delay(&self) -> Duration {
        Duration::from_secs(self.crawl_retry_delay_secs)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn product_path_marker(&self) -> &str {
        &self.product_path_marker
    }

    #[must_use]
    pub fn throttle_batch_size(&self) -> usize {
        self.throttle_batch_size
    }

    #[must_use]
    pub fn throttle_pause(&self) -> Duration {
        Duration::from_secs(self.throttle_pause_secs)
    }

    #[must_use]
    pub fn extraction(&self) -> &ExtractionSettings {
        &self.extraction
    }
}
