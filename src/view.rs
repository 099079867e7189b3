// src/view.rs
//! Presentation model for the dashboard page.
//!
//! Pipeline per render: snapshot → dedup → filter → rows. Counts, sidebar
//! ordering and the empty states are decided here so renderers stay dumb.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use metrics::gauge;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyze::{classify, deduplicate_with_report, filter_articles, ClassifiedType, FilterMode};
use crate::article::Article;
use crate::dashboard::notify::Notification;
use crate::dashboard::DashboardState;

#[derive(Debug, Clone, Serialize)]
pub struct ArticleRow {
    pub title: String,
    pub link: String,
    pub kind: ClassifiedType,
    pub type_label: &'static str,
    pub badge_class: &'static str,
    /// e.g. `Jan 6, 09:05 AM` (UTC); empty when the backend sent no usable date.
    pub published: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsTotals {
    pub total_articles: u64,
    pub total_sources: usize,
    pub total_queries: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub filter: FilterMode,
    pub loading: bool,
    pub refreshing: bool,
    pub last_updated: Option<String>,
    /// Articles left after deduplication.
    pub total_count: usize,
    /// Articles left after deduplication and filtering.
    pub filtered_count: usize,
    pub rows: Vec<ArticleRow>,
    pub no_news: bool,
    pub no_matches: bool,
    pub totals: StatsTotals,
    pub top_sources: Vec<SidebarEntry>,
    pub top_queries: Vec<SidebarEntry>,
    pub notifications: Vec<Notification>,
}

pub fn build_view(state: &DashboardState, now: DateTime<Utc>) -> DashboardView {
    let (unique, dropped) = deduplicate_with_report(&state.articles);
    gauge!("dashboard_dedup_dropped").set(dropped as f64);

    let filtered = filter_articles(&unique, state.filter);
    let rows: Vec<ArticleRow> = filtered.iter().map(article_row).collect();

    let stats = &state.stats;
    DashboardView {
        filter: state.filter,
        loading: !state.news_loaded,
        refreshing: state.refreshing,
        last_updated: state.last_updated.map(|t| time_ago(t, now)),
        total_count: unique.len(),
        filtered_count: rows.len(),
        no_news: state.articles.is_empty(),
        no_matches: rows.is_empty() && !unique.is_empty(),
        rows,
        totals: StatsTotals {
            total_articles: stats.total_articles,
            total_sources: stats.top_sources.len(),
            total_queries: stats.top_queries.len(),
        },
        top_sources: sorted_by_count(&stats.top_sources),
        top_queries: sorted_by_count(&stats.top_queries),
        notifications: state.notifications.clone(),
    }
}

fn article_row(a: &Article) -> ArticleRow {
    let kind = classify(a);
    ArticleRow {
        title: a.title.clone(),
        link: a.link.clone(),
        kind,
        type_label: kind.label(),
        badge_class: kind.badge_class(),
        published: a
            .published
            .map(|t| format_published(t.with_timezone(&Local)))
            .unwrap_or_default(),
        source: a.source.clone().unwrap_or_default(),
    }
}

/// Count descending; ties by label so the order is stable between renders.
pub fn sorted_by_count(map: &BTreeMap<String, u64>) -> Vec<SidebarEntry> {
    let mut v: Vec<SidebarEntry> = map
        .iter()
        .map(|(label, count)| SidebarEntry {
            label: label.clone(),
            count: *count,
        })
        .collect();
    // BTreeMap already yields labels ascending; a stable sort keeps that for ties.
    v.sort_by(|a, b| b.count.cmp(&a.count));
    v
}

/// Rows show the dashboard host's wall clock.
pub fn format_published<Tz>(dt: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    dt.format("%b %-d, %I:%M %p").to_string()
}

/// `Just now`, `12m ago`, `3h ago`, `2d ago`. Future timestamps read as `Just now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}
