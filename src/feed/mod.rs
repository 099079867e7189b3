// src/feed/mod.rs
//! Backend feed: the only way the dashboard talks to the news API.

pub mod http;

use crate::article::{NewsPayload, StatsSnapshot};

/// Failure of a single backend call. Never fatal to the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("{endpoint} returned an unreadable body: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FeedError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            FeedError::Network { endpoint, .. }
            | FeedError::Status { endpoint, .. }
            | FeedError::Parse { endpoint, .. } => endpoint,
        }
    }
}

#[async_trait::async_trait]
pub trait NewsFeed: Send + Sync {
    /// `GET /api/news`
    async fn fetch_news(&self) -> Result<NewsPayload, FeedError>;
    /// `GET /api/stats`
    async fn fetch_stats(&self) -> Result<StatsSnapshot, FeedError>;
    /// `GET /api/refresh`: backend re-scrapes, then answers like `/api/news`.
    async fn refresh_news(&self) -> Result<NewsPayload, FeedError>;
    fn name(&self) -> &str;
}
