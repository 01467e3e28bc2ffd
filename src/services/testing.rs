// src/services/testing.rs

//! In-memory page source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Page, PageId};
use crate::services::PageSource;
use crate::storage::TraceLog;

/// Serves pages from a map and counts calls per id.
#[derive(Default)]
pub struct StubSource {
    pages: HashMap<PageId, Page>,
    failures: HashMap<PageId, u32>,
    calls: Mutex<HashMap<PageId, u32>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert(page.page_id(), page);
        self
    }

    /// Make the first `times` calls for `id` fail with a 503.
    pub fn failing(mut self, id: &str, times: u32) -> Self {
        self.failures.insert(PageId::new(id), times);
        self
    }

    pub fn calls(&self, id: &PageId) -> u32 {
        self.calls.lock().unwrap().get(id).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn fetch(&self, id: &PageId, trace: Option<&mut TraceLog>) -> Result<Page> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(id.clone()).or_insert(0);
            *count += 1;
            *count
        };

        if let Some(trace) = trace {
            trace.record(&format!("GET {} (call {})", id, call)).await;
        }

        if call <= self.failures.get(id).copied().unwrap_or(0) {
            return Err(AppError::Remote {
                id: id.to_string(),
                status: 503,
                message: format!("attempt {} failed", call),
            });
        }

        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}
