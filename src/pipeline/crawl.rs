// src/pipeline/crawl.rs

//! Cache-first crawl pipeline.

use crate::error::{AppError, Result};
use crate::models::{CrawlStats, PageId};
use crate::services::{CrawlOutcome, PageCrawler};
use crate::utils::log;

/// Crawl everything reachable from `seeds`.
pub async fn run_crawl(
    crawler: &PageCrawler,
    seeds: &[PageId],
    use_cache: bool,
) -> Result<CrawlOutcome> {
    if seeds.is_empty() {
        return Err(AppError::config("No seed page ids given"));
    }

    log::header("Crawling pages");
    log::sub_item(&format!("Seeds: {}", join_ids(seeds)));
    log::sub_item(&format!("Cache: {}", if use_cache { "enabled" } else { "disabled" }));

    crawler.store().init().await?;
    let outcome = crawler.crawl(seeds, use_cache).await?;

    report(&outcome.stats);
    Ok(outcome)
}

/// Log crawl counters.
pub(crate) fn report(stats: &CrawlStats) {
    log::summary(
        "Crawl finished",
        &[
            ("Pages", stats.resolved.to_string()),
            ("From cache", stats.cache_hits.to_string()),
            ("Downloaded", stats.downloads.to_string()),
            ("Duplicates skipped", stats.duplicates_skipped.to_string()),
            ("Cache write warnings", stats.cache_write_warnings.to_string()),
            ("Elapsed", stats.elapsed_display()),
        ],
    );
}

fn join_ids(ids: &[PageId]) -> String {
    ids.iter()
        .map(PageId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
