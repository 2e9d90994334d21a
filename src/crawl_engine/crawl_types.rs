//! Core types for scrape runs.
//!
//! This module contains the crate-boundary error type and the summary
//! struct returned by the crawl stage.

use std::fmt;

/// Custom error type for scrape runs
#[derive(Debug, Clone)]
pub enum ScrapeError {
    /// Configuration error
    ConfigError(String),
    /// Setup error before any crawling began (credentials, output directory)
    SetupError(String),
    /// Other errors
    Other(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::SetupError(msg) => write!(f, "Setup error: {msg}"),
            Self::Other(msg) => write!(f, "Scrape error: {msg}"),
        }
    }
}

impl std::error::Error for ScrapeError {}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // Use {:#} to preserve full error chain with context
        Self::Other(format!("{err:#}"))
    }
}

/// Convenience alias for Result with `ScrapeError`
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Counters reported by a completed crawl.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlOutcome {
    /// URLs claimed into the visited set (and written to the discovery log)
    pub pages_discovered: usize,
    /// Nodes whose fetch succeeded and whose links were expanded
    pub pages_fetched: usize,
    /// Nodes abandoned after fetch errors or exhausted timeout retries
    pub pages_abandoned: usize,
}
