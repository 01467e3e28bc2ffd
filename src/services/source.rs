// src/services/source.rs

//! Remote page source abstraction.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Page, PageId};
use crate::storage::TraceLog;

/// Capability to fetch one page from the remote document service.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a single page by normalized id.
    ///
    /// When `trace` is given, the raw request/response exchange is written to
    /// it for the duration of the call.
    async fn fetch(&self, id: &PageId, trace: Option<&mut TraceLog>) -> Result<Page>;
}
