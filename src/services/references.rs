// src/services/references.rs

//! Page reference discovery inside a content tree.

use std::collections::HashSet;

use crate::models::{Block, Page, PageId};

/// Collect the ids of every page-reference block below the page root.
///
/// Blocks are visited depth-first in document order, so the result lists
/// references in the order they appear. Each id appears once. The root block
/// itself is not reported, and references whose id cannot serve as a cache
/// key are dropped with a warning.
pub fn find_sub_page_ids(page: &Page) -> Vec<PageId> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    // Explicit stack: nesting depth is unbounded
    let mut stack: Vec<&Block> = page.root.children().rev().collect();
    while let Some(block) = stack.pop() {
        if block.is_page_reference() {
            let id = PageId::new(&block.id);
            if !id.is_safe_key() {
                log::warn!("Ignoring page reference with unusable id {:?}", block.id);
            } else if seen.insert(id.clone()) {
                found.push(id);
            }
        }
        stack.extend(block.children().rev());
    }

    found
}
