// src/analyze/mod.rs
//! Article analysis: title normalization, deduplication, classification, filtering.
//! Pure functions only; no I/O and no hidden state.

pub mod classify;
pub mod dedup;
pub mod filter;
pub mod normalize;

pub use crate::analyze::classify::{classify, classify_text, ClassifiedType};
pub use crate::analyze::dedup::{deduplicate, deduplicate_with_report};
pub use crate::analyze::filter::{filter_articles, FilterMode};
pub use crate::analyze::normalize::normalize_title;
