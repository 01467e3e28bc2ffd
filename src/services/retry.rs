// src/services/retry.rs

//! Bounded retry for transient fetch failures.
//!
//! Every error is treated as transient: a "not found" is retried exactly like
//! a connection reset. Callers that care about permanent errors inspect the
//! returned error themselves.

use std::time::Duration;

use crate::error::Result;
use crate::models::{Page, PageId, RetryConfig};
use crate::services::PageSource;
use crate::storage::TraceLog;

/// Fixed-interval retry policy around a [`PageSource`].
#[derive(Debug, Clone)]
pub struct Retrier {
    max_attempts: u32,
    delay: Duration,
}

impl Retrier {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.delay())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetch `id`, retrying after a fixed delay on any error.
    ///
    /// Returns the first success, or the final attempt's error once every
    /// attempt has failed.
    pub async fn fetch_with_retry(
        &self,
        source: &dyn PageSource,
        id: &PageId,
        mut trace: Option<&mut TraceLog>,
    ) -> Result<Page> {
        let mut attempt = 1;
        loop {
            match source.fetch(id, trace.as_deref_mut()).await {
                Ok(page) => return Ok(page),
                Err(e) if attempt < self.max_attempts => {
                    log::warn!(
                        "Download {} failed on attempt {}/{}: {}",
                        id,
                        attempt,
                        self.max_attempts,
                        e
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for Retrier {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
