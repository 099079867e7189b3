// src/analyze/dedup.rs
use std::collections::HashSet;

use crate::analyze::normalize::normalize_title;
use crate::article::Article;

/// Order-preserving, first-occurrence-wins deduplication.
///
/// An article is dropped when its link or its normalized title was already
/// seen among the *kept* articles. Both sets only grow on keep.
pub fn deduplicate(articles: &[Article]) -> Vec<Article> {
    deduplicate_with_report(articles).0
}

/// Same as [`deduplicate`], also returning how many articles were dropped.
pub fn deduplicate_with_report(articles: &[Article]) -> (Vec<Article>, usize) {
    let mut seen_links: HashSet<&str> = HashSet::new();
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut keep = Vec::with_capacity(articles.len());
    let mut dropped = 0usize;

    for a in articles {
        if seen_links.contains(a.link.as_str()) {
            dropped += 1;
            continue;
        }
        let key = normalize_title(&a.title);
        if seen_keys.contains(&key) {
            dropped += 1;
            continue;
        }
        seen_links.insert(a.link.as_str());
        seen_keys.insert(key);
        keep.push(a.clone());
    }

    (keep, dropped)
}
