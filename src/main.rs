//! Crypto Treasury News Dashboard: binary entrypoint.
//! Polls the news backend, keeps the snapshot fresh on a schedule, and serves
//! the dashboard page locally.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crypto_treasury_dashboard::{
    api,
    config::DashboardConfig,
    dashboard::{
        scheduler::{spawn_initial_load, spawn_schedulers},
        Dashboard,
    },
    metrics::Metrics,
    HttpFeed,
};

/// Compact logs by default; `DASHBOARD_LOG_JSON=1` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crypto_treasury_dashboard=info,warn"));

    let json = std::env::var("DASHBOARD_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = DashboardConfig::load_default().context("loading dashboard config")?;
    tracing::info!(
        backend = %cfg.backend_url,
        bind = %cfg.bind_addr,
        news_every_s = cfg.news_interval_secs,
        full_every_s = cfg.full_interval_secs,
        "dashboard config loaded"
    );

    let metrics = if cfg.metrics_enabled {
        Some(Metrics::init()?)
    } else {
        None
    };

    let mut feed = HttpFeed::new(cfg.backend_url.clone());
    if let Some(secs) = cfg.request_timeout_secs {
        feed = feed.with_timeout(secs);
    }
    let dashboard = Arc::new(Dashboard::new(Arc::new(feed)));

    // Log a one-line summary whenever the snapshot changes.
    let mut changes = dashboard.subscribe();
    let watcher = Arc::clone(&dashboard);
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let s = watcher.snapshot();
            tracing::debug!(
                target: "render",
                articles = s.articles.len(),
                filter = %s.filter,
                toasts = s.notifications.len(),
                "dashboard state changed"
            );
        }
    });

    let mut app = api::router(Arc::clone(&dashboard));
    if let Some(m) = &metrics {
        app = app.merge(m.router());
    }

    let listener = TcpListener::bind(cfg.bind_addr.as_str())
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    tracing::info!(addr = %cfg.bind_addr, "dashboard listening");

    // Serve the loading page while the first fetch is still pending.
    spawn_initial_load(Arc::clone(&dashboard));
    let _schedulers = spawn_schedulers(Arc::clone(&dashboard), cfg.scheduler());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("dashboard server")?;

    Ok(())
}
