// tests/common/mod.rs
// Scripted in-memory feed shared by the controller, scheduler and API tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crypto_treasury_dashboard::feed::{FeedError, NewsFeed};
use crypto_treasury_dashboard::{Article, NewsPayload, StatsSnapshot};

/// One scripted reply: an optional gate to hold it back, then Ok or an HTTP status.
pub struct Reply<T> {
    gate: Option<Arc<Semaphore>>,
    result: Result<T, u16>,
}

impl<T> Reply<T> {
    pub fn ok(v: T) -> Self {
        Self { gate: None, result: Ok(v) }
    }

    pub fn status(code: u16) -> Self {
        Self { gate: None, result: Err(code) }
    }

    pub fn gated(mut self, gate: &Arc<Semaphore>) -> Self {
        self.gate = Some(Arc::clone(gate));
        self
    }
}

#[derive(Default)]
pub struct StubFeed {
    news: Mutex<VecDeque<Reply<NewsPayload>>>,
    refresh: Mutex<VecDeque<Reply<NewsPayload>>>,
    stats: Mutex<VecDeque<Reply<StatsSnapshot>>>,
    news_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    stats_calls: AtomicUsize,
}

impl StubFeed {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_news(&self, r: Reply<NewsPayload>) {
        self.news.lock().unwrap().push_back(r);
    }

    pub fn push_refresh(&self, r: Reply<NewsPayload>) {
        self.refresh.lock().unwrap().push_back(r);
    }

    pub fn push_stats(&self, r: Reply<StatsSnapshot>) {
        self.stats.lock().unwrap().push_back(r);
    }

    pub fn news_calls(&self) -> usize {
        self.news_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

async fn play<T: Default>(
    queue: &Mutex<VecDeque<Reply<T>>>,
    calls: &AtomicUsize,
    endpoint: &'static str,
) -> Result<T, FeedError> {
    let reply = queue.lock().unwrap().pop_front();
    calls.fetch_add(1, Ordering::SeqCst);
    let Some(reply) = reply else {
        return Ok(T::default());
    };
    if let Some(gate) = reply.gate {
        gate.acquire().await.expect("gate closed").forget();
    }
    reply
        .result
        .map_err(|status| FeedError::Status { endpoint, status })
}

#[async_trait]
impl NewsFeed for StubFeed {
    async fn fetch_news(&self) -> Result<NewsPayload, FeedError> {
        play(&self.news, &self.news_calls, "/api/news").await
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, FeedError> {
        play(&self.stats, &self.stats_calls, "/api/stats").await
    }

    async fn refresh_news(&self) -> Result<NewsPayload, FeedError> {
        play(&self.refresh, &self.refresh_calls, "/api/refresh").await
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub fn payload(titles: &[&str]) -> NewsPayload {
    NewsPayload {
        articles: titles
            .iter()
            .enumerate()
            .map(|(i, t)| Article::new(*t, format!("https://news.example/{i}")))
            .collect(),
        last_updated: None,
    }
}

pub fn titles(d: &crypto_treasury_dashboard::Dashboard) -> Vec<String> {
    d.snapshot().articles.iter().map(|a| a.title.clone()).collect()
}
