// src/dashboard/scheduler.rs
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{Dashboard, FetchOutcome};

#[derive(Clone, Copy, Debug)]
pub struct SchedulerCfg {
    /// News-only reload period.
    pub news_interval: Duration,
    /// News + stats reload period.
    pub full_interval: Duration,
}

impl Default for SchedulerCfg {
    fn default() -> Self {
        Self {
            news_interval: Duration::from_secs(5 * 60),
            full_interval: Duration::from_secs(30 * 60),
        }
    }
}

/// Handles of the two periodic loops. Dropping it stops both.
pub struct SchedulerHandle {
    news: JoinHandle<()>,
    full: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn shutdown(self) {
        // Drop does the work.
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.news.abort();
        self.full.abort();
    }
}

/// Run the startup fetch (news and stats together) in the background, so the
/// page can be served with its loading state while the backend is slow.
pub fn spawn_initial_load(dashboard: Arc<Dashboard>) -> JoinHandle<(FetchOutcome, FetchOutcome)> {
    tokio::spawn(async move {
        let (news, stats) = dashboard.load_initial().await;
        tracing::info!(target: "scheduler", ?news, ?stats, "initial load finished");
        (news, stats)
    })
}

/// Spawn the two refresh loops. They run independently and never cancel each
/// other; the first tick of each fires one full period after spawning.
pub fn spawn_schedulers(dashboard: Arc<Dashboard>, cfg: SchedulerCfg) -> SchedulerHandle {
    let news = {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(async move {
            let mut ticker = ticker(cfg.news_interval);
            loop {
                ticker.tick().await;
                counter!("dashboard_scheduler_ticks_total", "loop" => "news").increment(1);
                let outcome = dashboard.load_news().await;
                tracing::info!(target: "scheduler", ?outcome, "periodic news reload");
            }
        })
    };

    let full = tokio::spawn(async move {
        let mut ticker = ticker(cfg.full_interval);
        loop {
            ticker.tick().await;
            counter!("dashboard_scheduler_ticks_total", "loop" => "full").increment(1);
            let (news, stats) = tokio::join!(dashboard.load_news(), dashboard.load_stats());
            tracing::info!(target: "scheduler", news = ?news, stats = ?stats, "periodic full reload");
        }
    });

    SchedulerHandle { news, full }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut t = interval_at(Instant::now() + period, period);
    // No catch-up bursts after a stalled reload.
    t.set_missed_tick_behavior(MissedTickBehavior::Delay);
    t
}
