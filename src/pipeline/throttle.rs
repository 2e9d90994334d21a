//! Counter-based batch throttle for the extraction pipeline.
//!
//! The extraction service's rate limit is global, so the pipeline pauses
//! for a fixed interval after every full batch of URLs. Modeled as its own
//! type rather than an inline sleep so the cadence is testable under a
//! paused clock.

use std::time::Duration;

use log::info;

/// Pauses for `pause` after every `batch_size` ticks.
#[derive(Debug)]
pub struct BatchThrottle {
    batch_size: usize,
    pause: Duration,
    processed: usize,
}

impl BatchThrottle {
    #[must_use]
    pub fn new(batch_size: usize, pause: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            pause,
            processed: 0,
        }
    }

    /// Account for one URL. Sleeps when a full batch has gone out since
    /// the last pause. Every URL the pipeline looks at counts, including
    /// ones that end up skipped.
    pub async fn tick(&mut self) {
        if self.processed > 0 && self.processed % self.batch_size == 0 {
            info!(
                "Processed {} URLs; pausing {}s for the extraction service rate limit",
                self.processed,
                self.pause.as_secs()
            );
            tokio::time::sleep(self.pause).await;
        }
        self.processed += 1;
    }

    /// Number of ticks so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed
    }
}
