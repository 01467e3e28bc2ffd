// src/storage/mod.rs

//! Persistent page cache and request diagnostics.
//!
//! ## Directory Structure
//!
//! ```text
//! notion_cache/               # cache_dir: one entry per normalized id
//! ├── 2131b10cebf64938a1277089ff02dbe4.json
//! └── ...
//! log/                        # log_dir: request trace of the last download
//! ├── 2131b10cebf64938a1277089ff02dbe4.log.txt
//! └── ...
//! ```
//!
//! Cache entries outlive a crawl; they are overwritten on every successful
//! download and deleted only by explicit invalidation.

pub mod local;
pub mod trace;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Page, PageId};

// Re-export for convenience
pub use local::LocalStorage;
pub use trace::TraceLog;

/// File extension of cache entries.
pub const ENTRY_EXTENSION: &str = "json";

/// Suffix of per-page request traces.
pub const TRACE_SUFFIX: &str = ".log.txt";

/// Trait for page cache backends.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Create the storage area. Failure is fatal.
    async fn init(&self) -> Result<()>;

    /// Read a cached page.
    ///
    /// A missing entry is `Ok(None)`. An entry that exists but does not
    /// deserialize is a fatal `CacheCorrupt` error.
    async fn load(&self, id: &PageId) -> Result<Option<Page>>;

    /// Persist a page, replacing any previous entry.
    ///
    /// Errors are recoverable `CacheWrite` warnings.
    async fn store(&self, id: &PageId, page: &Page) -> Result<()>;

    /// Delete the entry and the request trace for one id.
    ///
    /// Missing files are not an error. Other failures are recoverable
    /// `CacheRemove` warnings.
    async fn remove(&self, id: &PageId) -> Result<()>;

    /// Delete every entry and trace, then recreate the empty storage area.
    async fn wipe_all(&self) -> Result<()>;

    /// Open a fresh request trace for one download.
    ///
    /// Returns `None` when tracing is disabled or the file cannot be created.
    async fn open_trace(&self, id: &PageId) -> Option<TraceLog>;
}
