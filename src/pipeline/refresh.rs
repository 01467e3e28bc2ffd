// src/pipeline/refresh.rs

//! Single-page cache maintenance.

use crate::error::Result;
use crate::models::{Page, PageId};
use crate::services::PageCrawler;
use crate::utils::log;

/// Download one page, bypassing the cache, and overwrite its cache entry.
///
/// No references are followed.
pub async fn run_refresh(crawler: &PageCrawler, raw_id: &str) -> Result<Page> {
    let id = PageId::new(raw_id);
    crawler.store().init().await?;

    let (page, persisted) = crawler.refresh(&id).await?;
    if persisted {
        log::success(&format!("Downloaded {} {}", id, page.title()));
    } else {
        log::sub_item(&format!("Downloaded {} {} (not cached)", id, page.title()));
    }
    Ok(page)
}

/// Delete the cache entry and request log of one page.
///
/// Removal failures are reported and otherwise ignored.
pub async fn run_invalidate(crawler: &PageCrawler, raw_id: &str) -> Result<()> {
    let id = PageId::new(raw_id);
    match crawler.invalidate(&id).await {
        Ok(()) => {
            log::success(&format!("Removed cached copy of {}", id));
            Ok(())
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            ::log::warn!("{}", e);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Block;
    use crate::services::{PageSource, Retrier, testing::StubSource};
    use crate::storage::{LocalStorage, PageStore};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn setup(tmp: &TempDir, stub: &Arc<StubSource>) -> (LocalStorage, PageCrawler) {
        let store = LocalStorage::new(tmp.path().join("cache"), tmp.path().join("log"));
        let source: Arc<dyn PageSource> = stub.clone();
        let crawler =
            PageCrawler::new(source, Arc::new(store.clone()), Retrier::new(1, Duration::ZERO));
        (store, crawler)
    }

    #[tokio::test]
    async fn test_refresh_normalizes_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let stub = Arc::new(StubSource::new().with_page(Page::new(Block::page("ab-cd", "New"))));
        let (store, crawler) = setup(&tmp, &stub);
        store
            .store(&PageId::new("abcd"), &Page::new(Block::page("abcd", "Old")))
            .await
            .unwrap();

        let page = run_refresh(&crawler, "a-b-c-d").await.unwrap();

        assert_eq!(page.title(), "New");
        assert_eq!(stub.calls(&PageId::new("abcd")), 1);
        let cached = store.load(&PageId::new("abcd")).await.unwrap().unwrap();
        assert_eq!(cached.title(), "New");
    }

    #[tokio::test]
    async fn test_refresh_failure_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let stub = Arc::new(StubSource::new());
        let (_, crawler) = setup(&tmp, &stub);

        let err = run_refresh(&crawler, "missing").await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let tmp = TempDir::new().unwrap();
        let stub = Arc::new(StubSource::new());
        let (store, crawler) = setup(&tmp, &stub);
        let id = PageId::new("abcd");
        store
            .store(&id, &Page::new(Block::page("abcd", "Old")))
            .await
            .unwrap();

        run_invalidate(&crawler, "ab-cd").await.unwrap();

        assert!(store.load(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_missing_entry_is_ok() {
        let tmp = TempDir::new().unwrap();
        let stub = Arc::new(StubSource::new());
        let (_, crawler) = setup(&tmp, &stub);

        assert!(run_invalidate(&crawler, "nothing-here").await.is_ok());
    }
}
