// tests/metrics.rs
// One test per binary: the Prometheus recorder is process-global.
mod common;

use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use common::{payload, Reply, StubFeed};
use crypto_treasury_dashboard::{api, metrics::Metrics, Dashboard};

#[tokio::test]
async fn metrics_endpoint_reports_snapshot_series() {
    let m = Metrics::init().expect("install recorder");

    let feed = StubFeed::new();
    feed.push_news(Reply::ok(payload(&[
        "Tesla Acquires 500 BTC",
        "Breaking: Tesla buys 500 BTC - Reuters",
    ])));
    let d = Arc::new(Dashboard::new(feed.clone()));
    d.load_news().await;

    let app = api::router(d).merge(m.router());

    // render once so the dedup gauge is set
    let resp = app
        .clone()
        .oneshot(Request::get("/api/view").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert_eq!(sample(&text, "dashboard_articles"), Some(2.0), "{text}");
    assert_eq!(sample(&text, "dashboard_dedup_dropped"), Some(1.0), "{text}");
}

fn sample(text: &str, name: &str) -> Option<f64> {
    text.lines()
        .filter(|l| !l.starts_with('#'))
        .find_map(|l| l.strip_prefix(name)?.strip_prefix(' ')?.trim().parse().ok())
}
