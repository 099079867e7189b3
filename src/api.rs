// src/api.rs
//! Local HTTP surface: the rendered dashboard, its JSON view model, and the
//! manual refresh button.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::analyze::FilterMode;
use crate::dashboard::{Dashboard, RefreshOutcome};
use crate::render::render_page;
use crate::view::{build_view, DashboardView};

pub type AppState = Arc<Dashboard>;

pub fn router(dashboard: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(page))
        .route("/api/view", get(view_json))
        .route("/api/refresh", post(refresh))
        .route("/refresh", post(refresh_form))
        .layer(CorsLayer::very_permissive())
        .with_state(dashboard)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ViewQuery {
    filter: Option<String>,
}

/// A `?filter=` param behaves like clicking the filter control.
fn apply_filter(dashboard: &Dashboard, q: &ViewQuery) -> Result<(), Response> {
    let Some(raw) = q.filter.as_deref() else {
        return Ok(());
    };
    match raw.parse::<FilterMode>() {
        Ok(mode) => {
            dashboard.set_filter(mode);
            Ok(())
        }
        Err(e) => Err((StatusCode::BAD_REQUEST, e.to_string()).into_response()),
    }
}

fn current_view(dashboard: &Dashboard) -> DashboardView {
    let now = Utc::now();
    build_view(&dashboard.snapshot_at(now), now)
}

async fn page(State(dashboard): State<AppState>, Query(q): Query<ViewQuery>) -> Response {
    if let Err(rsp) = apply_filter(&dashboard, &q) {
        return rsp;
    }
    Html(render_page(&current_view(&dashboard))).into_response()
}

async fn view_json(State(dashboard): State<AppState>, Query(q): Query<ViewQuery>) -> Response {
    if let Err(rsp) = apply_filter(&dashboard, &q) {
        return rsp;
    }
    Json(current_view(&dashboard)).into_response()
}

async fn refresh(State(dashboard): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match dashboard.refresh().await {
        RefreshOutcome::Refreshed => (StatusCode::OK, Json(json!({ "status": "refreshed" }))),
        RefreshOutcome::AlreadyRunning => (
            StatusCode::CONFLICT,
            Json(json!({ "status": "already_running" })),
        ),
        RefreshOutcome::Failed => (StatusCode::BAD_GATEWAY, Json(json!({ "status": "failed" }))),
    }
}

/// HTML button target; the outcome shows up as a toast on the page.
async fn refresh_form(State(dashboard): State<AppState>) -> Redirect {
    let outcome = dashboard.refresh().await;
    tracing::debug!(target: "api", ?outcome, "refresh from page");
    Redirect::to("/")
}
