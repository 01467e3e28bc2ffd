// src/services/crawler.rs

//! Breadth-first page crawler.
//!
//! Seeds enter a FIFO queue. Each dequeued id is skipped if the repository
//! already holds it, otherwise it is resolved (cache first when enabled,
//! then the remote source through the retrier), stored in the repository,
//! and scanned for page references, which are queued in document order.
//! The repository check at dequeue time is what makes every id resolve at
//! most once and lets cyclic page graphs terminate.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Config, CrawlStats, Page, PageId, PageRepository};
use crate::services::{PageSource, Retrier, find_sub_page_ids};
use crate::storage::PageStore;

/// Where a resolved page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    Cache,
    /// Downloaded; `persisted` is false when the cache write failed
    Remote { persisted: bool },
}

/// Result of a crawl run.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub repository: PageRepository,
    pub stats: CrawlStats,
}

/// Service resolving pages and walking the reference graph.
pub struct PageCrawler {
    source: Arc<dyn PageSource>,
    store: Arc<dyn PageStore>,
    retrier: Retrier,
}

impl PageCrawler {
    pub fn new(source: Arc<dyn PageSource>, store: Arc<dyn PageStore>, retrier: Retrier) -> Self {
        Self {
            source,
            store,
            retrier,
        }
    }

    /// Create a crawler using the retry policy from `config`.
    pub fn from_config(
        config: &Config,
        source: Arc<dyn PageSource>,
        store: Arc<dyn PageStore>,
    ) -> Self {
        Self::new(source, store, Retrier::from_config(&config.retry))
    }

    pub fn store(&self) -> &dyn PageStore {
        self.store.as_ref()
    }

    /// Crawl the transitive closure of page references reachable from `seeds`.
    ///
    /// Any fatal error (exhausted fetch, corrupt cache entry) aborts the whole
    /// crawl; there are no partial results.
    pub async fn crawl(&self, seeds: &[PageId], use_cache: bool) -> Result<CrawlOutcome> {
        let mut stats = CrawlStats::start();
        let mut repository = PageRepository::new();
        let mut queue: VecDeque<PageId> = seeds.iter().cloned().collect();

        while let Some(id) = queue.pop_front() {
            if repository.contains(&id) {
                stats.duplicates_skipped += 1;
                continue;
            }

            let n = repository.len() + 1;
            let (page, origin) = self.resolve(&id, use_cache).await?;
            match origin {
                PageOrigin::Cache => {
                    stats.cache_hits += 1;
                    log::info!("Got {} from cache {} {}", n, id, page.title());
                }
                PageOrigin::Remote { persisted } => {
                    stats.downloads += 1;
                    if !persisted {
                        stats.cache_write_warnings += 1;
                    }
                    log::info!("Downloaded {} {} {}", n, id, page.title());
                }
            }

            let references = find_sub_page_ids(&page);
            repository.put(id, page);

            for reference in references {
                if !repository.contains(&reference) {
                    log::debug!("Queued {}", reference);
                    queue.push_back(reference);
                }
            }
        }

        stats.resolved = repository.len();
        stats.finish();
        Ok(CrawlOutcome { repository, stats })
    }

    /// Resolve one page without discovering its references.
    pub async fn resolve(&self, id: &PageId, use_cache: bool) -> Result<(Page, PageOrigin)> {
        if use_cache {
            if let Some(page) = self.store.load(id).await? {
                return Ok((page, PageOrigin::Cache));
            }
        }

        let (page, persisted) = self.download_and_cache(id).await?;
        Ok((page, PageOrigin::Remote { persisted }))
    }

    /// Force a remote fetch of one page and overwrite its cache entry.
    pub async fn refresh(&self, id: &PageId) -> Result<(Page, bool)> {
        self.download_and_cache(id).await
    }

    /// Delete the cache entry and request trace of one page.
    pub async fn invalidate(&self, id: &PageId) -> Result<()> {
        self.store.remove(id).await
    }

    /// Download a page with retries, then persist it.
    ///
    /// Returns the page and whether it reached the cache.
    async fn download_and_cache(&self, id: &PageId) -> Result<(Page, bool)> {
        id.file_key()?;
        let page = {
            let mut trace = self.store.open_trace(id).await;
            self.retrier
                .fetch_with_retry(self.source.as_ref(), id, trace.as_mut())
                .await
                .map_err(|e| AppError::fetch_failed(id.as_str(), self.retrier.max_attempts(), e))?
        };

        match self.store.store(id, &page).await {
            Ok(()) => Ok((page, true)),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::warn!("{}; keeping {} in memory only", e, id);
                Ok((page, false))
            }
        }
    }
}
