// src/dashboard/mod.rs
//! Dashboard controller.
//!
//! Owns the in-memory snapshot (articles, stats, current filter, toasts) and
//! the fetch operations that replace it. State lives behind a `RwLock` that is
//! never held across an `.await`; every write happens after the network call
//! has completed.
//!
//! Ordering: each news fetch (periodic load or manual refresh) and each stats
//! fetch takes a ticket when it is *issued*. A completion is applied only if
//! its ticket is newer than the last applied one for the same slot, so a slow
//! old response can never overwrite a newer snapshot.

pub mod notify;
pub mod scheduler;

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;

use crate::analyze::FilterMode;
use crate::article::{Article, NewsPayload, StatsSnapshot};
use crate::feed::{FeedError, NewsFeed};
use notify::{Level, Notification, Notifications};

pub const MSG_LOAD_FAILED: &str = "Failed to load news data. Please try again.";
pub const MSG_REFRESH_FAILED: &str = "Failed to refresh news. Please try again.";
pub const MSG_REFRESH_OK: &str = "News refreshed successfully!";

/// Point-in-time copy of the dashboard state handed to renderers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub articles: Arc<[Article]>,
    pub last_updated: Option<DateTime<Utc>>,
    pub stats: StatsSnapshot,
    pub filter: FilterMode,
    /// At least one news fetch has succeeded (hides the loading spinner).
    pub news_loaded: bool,
    pub refreshing: bool,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// Succeeded, but a newer response had already been applied.
    Stale,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    AlreadyRunning,
    Failed,
}

#[derive(Debug)]
struct Inner {
    articles: Arc<[Article]>,
    last_updated: Option<DateTime<Utc>>,
    stats: StatsSnapshot,
    filter: FilterMode,
    news_loaded: bool,
    news_ticket: u64,
    stats_ticket: u64,
    notifications: Notifications,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            articles: Arc::from(Vec::<Article>::new()),
            last_updated: None,
            stats: StatsSnapshot::default(),
            filter: FilterMode::All,
            news_loaded: false,
            news_ticket: 0,
            stats_ticket: 0,
            notifications: Notifications::default(),
        }
    }
}

#[derive(Clone, Copy)]
enum NewsSource {
    Load,
    Refresh,
}

pub struct Dashboard {
    feed: Arc<dyn NewsFeed>,
    inner: RwLock<Inner>,
    tickets: AtomicU64,
    refreshing: AtomicBool,
    changes: watch::Sender<u64>,
}

/// Clears the in-flight flag on every exit path of `refresh`.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Dashboard {
    pub fn new(feed: Arc<dyn NewsFeed>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            feed,
            inner: RwLock::new(Inner::default()),
            tickets: AtomicU64::new(0),
            refreshing: AtomicBool::new(false),
            changes,
        }
    }

    /// Receiver whose value is bumped after every state change ("re-render").
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> DashboardState {
        let g = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        DashboardState {
            articles: Arc::clone(&g.articles),
            last_updated: g.last_updated,
            stats: g.stats.clone(),
            filter: g.filter,
            news_loaded: g.news_loaded,
            refreshing: self.is_refreshing(),
            notifications: g.notifications.active(now),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    pub fn set_filter(&self, mode: FilterMode) {
        {
            let mut g = self.write();
            if g.filter == mode {
                return;
            }
            g.filter = mode;
        }
        tracing::debug!(target: "dashboard", filter = %mode, "filter changed");
        self.bump();
    }

    /// Startup: articles and stats concurrently.
    pub async fn load_initial(&self) -> (FetchOutcome, FetchOutcome) {
        tokio::join!(self.load_news(), self.load_stats())
    }

    pub async fn load_news(&self) -> FetchOutcome {
        let ticket = self.next_ticket();
        match self.feed.fetch_news().await {
            Ok(payload) => self.apply_news(ticket, payload, NewsSource::Load),
            Err(e) => {
                self.fail_news(&e, MSG_LOAD_FAILED);
                FetchOutcome::Failed
            }
        }
    }

    /// Stats failures are logged only; stats are secondary.
    pub async fn load_stats(&self) -> FetchOutcome {
        let ticket = self.next_ticket();
        match self.feed.fetch_stats().await {
            Ok(stats) => {
                {
                    let mut g = self.write();
                    if ticket <= g.stats_ticket {
                        drop(g);
                        self.stale("stats", ticket);
                        return FetchOutcome::Stale;
                    }
                    g.stats_ticket = ticket;
                    g.stats = stats;
                }
                tracing::debug!(target: "dashboard", ticket, "stats snapshot replaced");
                self.bump();
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(target: "dashboard", error = %e, feed = self.feed.name(), "error loading stats data");
                FetchOutcome::Failed
            }
        }
    }

    /// Manual refresh through the backend's refresh endpoint.
    /// A second call while one is pending returns `AlreadyRunning` and does nothing.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(guard) = self.try_begin_refresh() else {
            counter!("dashboard_refresh_skipped_total").increment(1);
            tracing::debug!(target: "dashboard", "refresh already in flight; ignored");
            return RefreshOutcome::AlreadyRunning;
        };
        self.bump();

        let ticket = self.next_ticket();
        let outcome = match self.feed.refresh_news().await {
            Ok(payload) => {
                self.apply_news(ticket, payload, NewsSource::Refresh);
                self.notify(Level::Success, MSG_REFRESH_OK);
                RefreshOutcome::Refreshed
            }
            Err(e) => {
                self.fail_news(&e, MSG_REFRESH_FAILED);
                RefreshOutcome::Failed
            }
        };

        drop(guard);
        self.bump();
        outcome
    }

    fn try_begin_refresh(&self) -> Option<RefreshGuard<'_>> {
        self.refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshGuard(&self.refreshing))
    }

    fn apply_news(&self, ticket: u64, payload: NewsPayload, source: NewsSource) -> FetchOutcome {
        let count = payload.articles.len();
        {
            let mut g = self.write();
            if ticket <= g.news_ticket {
                drop(g);
                self.stale("news", ticket);
                return FetchOutcome::Stale;
            }
            g.news_ticket = ticket;
            g.articles = Arc::from(payload.articles);
            g.last_updated = payload.last_updated;
            g.news_loaded = true;
        }

        gauge!("dashboard_articles").set(count as f64);
        let via = match source {
            NewsSource::Load => "load",
            NewsSource::Refresh => "refresh",
        };
        tracing::info!(target: "dashboard", articles = count, ticket, via, "news snapshot replaced");
        self.bump();
        FetchOutcome::Applied
    }

    fn fail_news(&self, e: &FeedError, message: &str) {
        tracing::warn!(
            target: "dashboard",
            error = %e,
            endpoint = e.endpoint(),
            feed = self.feed.name(),
            "news fetch failed; keeping previous snapshot"
        );
        self.notify(Level::Error, message);
    }

    fn stale(&self, slot: &'static str, ticket: u64) {
        counter!("dashboard_stale_responses_total", "slot" => slot).increment(1);
        tracing::debug!(target: "dashboard", slot, ticket, "dropping stale response");
    }

    fn notify(&self, level: Level, message: &str) {
        self.write().notifications.push(level, message, Utc::now());
        self.bump();
    }

    fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.changes.send_modify(|generation| *generation += 1);
    }
}
