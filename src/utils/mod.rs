// src/utils/mod.rs

//! Utility functions and helpers.

pub mod log;

use crate::models::PageId;

/// Normalize raw seed ids, dropping blanks and keeping first occurrences.
pub fn parse_seeds<S: AsRef<str>>(raw: &[S]) -> Vec<PageId> {
    let mut seeds: Vec<PageId> = Vec::new();
    for id in raw.iter().map(|s| s.as_ref().trim()).filter(|s| !s.is_empty()) {
        let id = PageId::new(id);
        if !seeds.contains(&id) {
            seeds.push(id);
        }
    }
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seeds() {
        let seeds = parse_seeds(&["ab-cd", " ", "abcd", "ef"]);
        assert_eq!(seeds, vec![PageId::new("abcd"), PageId::new("ef")]);
    }
}
