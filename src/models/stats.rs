// src/models/stats.rs

//! Crawl statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters collected while a crawl runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,

    /// Pages placed in the repository
    pub resolved: usize,
    /// Pages served from the cache
    pub cache_hits: usize,
    /// Pages fetched from the remote service
    pub downloads: usize,
    /// Dequeued ids that were already resolved
    pub duplicates_skipped: usize,
    /// Downloads that could not be persisted
    pub cache_write_warnings: usize,
}

impl CrawlStats {
    pub fn start() -> Self {
        Self {
            start_time: Utc::now(),
            end_time: None,
            resolved: 0,
            cache_hits: 0,
            downloads: 0,
            duplicates_skipped: 0,
            cache_write_warnings: 0,
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Utc::now());
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.end_time.unwrap_or_else(Utc::now) - self.start_time
    }

    /// Elapsed time as `1.234s`.
    pub fn elapsed_display(&self) -> String {
        let millis = self.elapsed().num_milliseconds().max(0);
        format!("{}.{:03}s", millis / 1000, millis % 1000)
    }
}
