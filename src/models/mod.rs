// src/models/mod.rs

//! Domain models for the mirror.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod page;
mod repository;
mod stats;

// Re-export all public types
pub use config::{CacheConfig, Config, RemoteConfig, RetryConfig};
pub use page::{Block, BlockKind, Page, PageId, normalize};
pub use repository::PageRepository;
pub use stats::CrawlStats;
