//! HTTP page fetching.
//!
//! One `reqwest` client with a fixed user-agent and per-request timeout
//! serves both stages. The crawl path retries timed-out requests a bounded
//! number of times with a fixed delay; the product pipeline fetches each
//! page exactly once (its retry budget lives in the extraction client).

use std::time::Duration;

use log::warn;
use thiserror::Error;

/// Fetch failure for a single URL.
///
/// Timeouts are distinguished from other transport failures because only
/// timeouts are retried on the crawl path.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP GET wrapper shared by the crawler and the product pipeline.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl PageFetcher {
    /// Build a fetcher with a fixed user-agent and request timeout.
    ///
    /// `max_attempts` and `retry_delay` govern only `fetch_with_retry`.
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        max_attempts: u32,
        retry_delay: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
            retry_delay,
        })
    }

    /// Fetch a page once. Any non-200 status is an error.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })
    }

    /// Fetch a page, retrying timeouts up to the configured attempt count
    /// with a fixed delay between attempts. Non-timeout failures (including
    /// non-200 statuses) are returned immediately.
    pub async fn fetch_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(FetchError::Timeout { .. }) if attempt < self.max_attempts => {
                    warn!(
                        "Timeout occurred for {url}. Retrying... (attempt {attempt}/{})",
                        self.max_attempts
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
