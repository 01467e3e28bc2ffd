// src/pipeline/redownload.rs

//! Full cache rebuild.

use crate::error::{AppError, Result};
use crate::models::PageId;
use crate::services::{CrawlOutcome, PageCrawler};
use crate::utils::log;

use super::crawl::run_crawl;

/// Wipe the whole cache, then crawl `seeds` again from the remote service.
///
/// Nothing is wiped when there are no seeds to crawl.
pub async fn run_redownload(crawler: &PageCrawler, seeds: &[PageId]) -> Result<CrawlOutcome> {
    if seeds.is_empty() {
        return Err(AppError::config("No seed page ids given; cache left untouched"));
    }

    log::header("Re-downloading all pages");

    log::step(1, 2, "Wipe cache and request logs");
    crawler.store().wipe_all().await?;

    log::step(2, 2, "Crawl without cache");
    let outcome = run_crawl(crawler, seeds, false).await?;

    log::success(&format!(
        "Loaded {} pages in {}",
        outcome.repository.len(),
        outcome.stats.elapsed_display()
    ));
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, Page};
    use crate::services::{PageSource, Retrier, testing::StubSource};
    use crate::storage::{LocalStorage, PageStore};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_redownload_without_seeds_keeps_cache() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path().join("cache"), tmp.path().join("log"));
        store
            .store(&PageId::new("keep"), &Page::new(Block::page("keep", "Keep")))
            .await
            .unwrap();
        let source: Arc<dyn PageSource> = Arc::new(StubSource::new());
        let crawler = PageCrawler::new(source, Arc::new(store.clone()), Retrier::new(1, Duration::ZERO));

        let err = run_redownload(&crawler, &[]).await.unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(store.cached_ids().await.unwrap(), vec![PageId::new("keep")]);
    }

    #[tokio::test]
    async fn test_redownload_ignores_and_replaces_cache() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path().join("cache"), tmp.path().join("log"));
        store.init().await.unwrap();
        store
            .store(&PageId::new("root"), &Page::new(Block::page("root", "Stale")))
            .await
            .unwrap();
        store
            .store(&PageId::new("orphan"), &Page::new(Block::page("orphan", "Orphan")))
            .await
            .unwrap();

        let stub = Arc::new(StubSource::new().with_page(Page::new(
            Block::page("root", "Fresh").with_children(vec![Block::page("c1", "Child")]),
        )).with_page(Page::new(Block::page("c1", "Child"))));
        let source: Arc<dyn PageSource> = stub.clone();
        let crawler = PageCrawler::new(source, Arc::new(store.clone()), Retrier::new(1, Duration::ZERO));

        let outcome = run_redownload(&crawler, &[PageId::new("root")]).await.unwrap();

        assert_eq!(outcome.repository.len(), 2);
        assert_eq!(stub.total_calls(), 2);
        assert_eq!(
            store.cached_ids().await.unwrap(),
            vec![PageId::new("c1"), PageId::new("root")]
        );
        let root = store.load(&PageId::new("root")).await.unwrap().unwrap();
        assert_eq!(root.title(), "Fresh");
    }
}
