// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod article;
pub mod config;
pub mod dashboard;
pub mod feed;
pub mod metrics;
pub mod render;
pub mod view;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{
    classify, deduplicate, filter_articles, normalize_title, ClassifiedType, FilterMode,
};
pub use crate::api::router;
pub use crate::article::{Article, NewsPayload, StatsSnapshot};
pub use crate::dashboard::{Dashboard, DashboardState, FetchOutcome, RefreshOutcome};
pub use crate::feed::{http::HttpFeed, FeedError, NewsFeed};
