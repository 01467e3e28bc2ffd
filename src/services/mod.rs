// src/services/mod.rs

//! Service layer for the mirror.
//!
//! This module contains the business logic for:
//! - Remote page fetching (`PageSource`, `HttpPageSource`)
//! - Transient failure retry (`Retrier`)
//! - Page reference discovery (`find_sub_page_ids`)
//! - Graph traversal and cache maintenance (`PageCrawler`)

mod crawler;
mod http;
mod references;
mod retry;
mod source;
#[cfg(test)]
pub(crate) mod testing;

pub use crawler::{CrawlOutcome, PageCrawler, PageOrigin};
pub use http::HttpPageSource;
pub use references::find_sub_page_ids;
pub use retry::Retrier;
pub use source::PageSource;
