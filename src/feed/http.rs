// src/feed/http.rs
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use super::{FeedError, NewsFeed};
use crate::article::{NewsPayload, StatsSnapshot};

pub const NEWS_PATH: &str = "/api/news";
pub const STATS_PATH: &str = "/api/stats";
pub const REFRESH_PATH: &str = "/api/refresh";

/// `reqwest` client for the news backend.
#[derive(Clone)]
pub struct HttpFeed {
    base_url: String,
    client: Client,
    timeout: Option<Duration>,
}

impl HttpFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            timeout: None,
        }
    }

    /// Per-request timeout; without one the transport defaults apply.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, FeedError> {
        let t0 = Instant::now();
        let url = format!("{}{}", self.base_url, endpoint);
        counter!("dashboard_fetch_total", "endpoint" => endpoint).increment(1);

        let result = self.get_json_inner(endpoint, &url).await;

        histogram!("dashboard_fetch_ms", "endpoint" => endpoint)
            .record(t0.elapsed().as_secs_f64() * 1_000.0);
        if let Err(e) = &result {
            counter!("dashboard_fetch_errors_total", "endpoint" => endpoint).increment(1);
            tracing::debug!(target: "feed", %url, error = %e, "backend call failed");
        }
        result
    }

    async fn get_json_inner<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<T, FeedError> {
        let mut req = self.client.get(url);
        if let Some(t) = self.timeout {
            req = req.timeout(t);
        }

        let rsp = req
            .send()
            .await
            .map_err(|source| FeedError::Network { endpoint, source })?;

        let status = rsp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        // Read as text first so transport and JSON failures stay distinct.
        let body = rsp
            .text()
            .await
            .map_err(|source| FeedError::Network { endpoint, source })?;
        serde_json::from_str(&body).map_err(|source| FeedError::Parse { endpoint, source })
    }
}

#[async_trait]
impl NewsFeed for HttpFeed {
    async fn fetch_news(&self) -> Result<NewsPayload, FeedError> {
        self.get_json(NEWS_PATH).await
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, FeedError> {
        self.get_json(STATS_PATH).await
    }

    async fn refresh_news(&self) -> Result<NewsPayload, FeedError> {
        self.get_json(REFRESH_PATH).await
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}
