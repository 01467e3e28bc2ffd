// src/models/repository.rs

//! Crawl-scoped mapping from normalized id to fetched page.

use std::collections::HashMap;

use crate::models::{Page, PageId};

/// Pages resolved during one crawl.
///
/// This is the single source of truth for "has this id already been fetched
/// in this crawl". Entries are only ever added.
#[derive(Debug, Default, Clone)]
pub struct PageRepository {
    pages: HashMap<PageId, Page>,
}

impl PageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &PageId) -> Option<&Page> {
        self.pages.get(id)
    }

    /// Insert a page. Returns false and keeps the existing entry if the id
    /// is already present.
    pub fn put(&mut self, id: PageId, page: Page) -> bool {
        match self.pages.entry(id) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(page);
                true
            }
        }
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.pages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Snapshot of every resolved page.
    pub fn all(&self) -> &HashMap<PageId, Page> {
        &self.pages
    }

    pub fn into_inner(self) -> HashMap<PageId, Page> {
        self.pages
    }

    /// Lookup for cross-page links, accepting raw or normalized ids.
    pub fn resolver<'a>(&'a self) -> impl Fn(&str) -> Option<&'a Page> + 'a {
        move |raw| self.pages.get(&PageId::new(raw))
    }
}
