// src/metrics.rs
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("dashboard_fetch_total", "Backend calls issued, by endpoint.");
        describe_counter!(
            "dashboard_fetch_errors_total",
            "Backend calls that failed (network, status or parse), by endpoint."
        );
        describe_histogram!("dashboard_fetch_ms", "Backend call latency in milliseconds.");
        describe_counter!(
            "dashboard_stale_responses_total",
            "Responses dropped because a newer one was already applied."
        );
        describe_counter!(
            "dashboard_refresh_skipped_total",
            "Manual refreshes ignored because one was in flight."
        );
        describe_counter!(
            "dashboard_scheduler_ticks_total",
            "Periodic reload ticks, by loop."
        );
        describe_gauge!("dashboard_articles", "Articles in the current snapshot.");
        describe_gauge!(
            "dashboard_dedup_dropped",
            "Articles hidden as duplicates in the last render."
        );
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Call once, early in `main`.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
