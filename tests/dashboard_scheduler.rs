// tests/dashboard_scheduler.rs
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StubFeed;
use crypto_treasury_dashboard::dashboard::scheduler::{spawn_schedulers, SchedulerCfg};
use crypto_treasury_dashboard::Dashboard;

#[tokio::test(start_paused = true)]
async fn news_every_five_minutes_everything_every_thirty() {
    let feed = StubFeed::new();
    let d = Arc::new(Dashboard::new(feed.clone()));
    let handle = spawn_schedulers(d, SchedulerCfg::default());

    // nothing fires immediately; the initial load is the caller's job
    tokio::time::sleep(Duration::from_secs(299)).await;
    assert_eq!(feed.news_calls(), 0);

    tokio::time::sleep(Duration::from_secs(2)).await; // t = 301s
    assert_eq!(feed.news_calls(), 1);
    assert_eq!(feed.stats_calls(), 0);

    tokio::time::sleep(Duration::from_secs(1500)).await; // t = 1801s
    // six 5-minute ticks plus the 30-minute tick's own news reload
    assert_eq!(feed.news_calls(), 7);
    assert_eq!(feed.stats_calls(), 1);

    handle.shutdown();
    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert_eq!(feed.news_calls(), 7);
    assert_eq!(feed.stats_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn custom_periods_are_honoured() {
    let feed = StubFeed::new();
    let d = Arc::new(Dashboard::new(feed.clone()));
    let _handle = spawn_schedulers(
        d,
        SchedulerCfg {
            news_interval: Duration::from_secs(10),
            full_interval: Duration::from_secs(25),
        },
    );

    tokio::time::sleep(Duration::from_secs(51)).await;
    // news loop: 10,20,30,40,50 ; full loop: 25,50
    assert_eq!(feed.news_calls(), 7);
    assert_eq!(feed.stats_calls(), 2);
}
