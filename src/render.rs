// src/render.rs
//! HTML rendering of a [`DashboardView`]. All backend text is escaped.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::analyze::FilterMode;
use crate::view::{ArticleRow, DashboardView, SidebarEntry};

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Crypto Treasury News</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body class="container-fluid py-3">
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

pub fn render_page(v: &DashboardView) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str(PAGE_HEAD);

    render_notifications(&mut out, v);
    render_header(&mut out, v);

    out.push_str("<div class=\"row\">\n<main class=\"col-lg-9\">\n");
    render_filter(&mut out, v.filter);
    render_table(&mut out, v);
    out.push_str("</main>\n<aside class=\"col-lg-3\">\n");
    render_sidebar(&mut out, "Top Sources", &v.top_sources, "No sources found");
    render_sidebar(&mut out, "Search Queries", &v.top_queries, "No queries found");
    out.push_str("</aside>\n</div>\n");

    out.push_str(PAGE_TAIL);
    out
}

fn render_notifications(out: &mut String, v: &DashboardView) {
    for n in &v.notifications {
        out.push_str(&format!(
            "<div class=\"alert alert-{} position-fixed top-0 end-0 m-3\">{}</div>\n",
            n.level.alert_class(),
            encode_text(&n.message)
        ));
    }
}

fn render_header(out: &mut String, v: &DashboardView) {
    out.push_str("<header class=\"d-flex justify-content-between mb-3\">\n");
    out.push_str("<h1 class=\"h4\">Crypto Treasury News</h1>\n<div>\n");
    out.push_str(&format!(
        "<span class=\"me-3\">Articles: {} &middot; Sources: {} &middot; Queries: {}</span>\n",
        v.totals.total_articles, v.totals.total_sources, v.totals.total_queries
    ));
    if let Some(ts) = &v.last_updated {
        out.push_str(&format!(
            "<span class=\"text-muted me-3\">Updated {}</span>\n",
            encode_text(ts)
        ));
    }
    let (disabled, label) = if v.refreshing {
        (" disabled", "Refreshing...")
    } else {
        ("", "Refresh News")
    };
    out.push_str(&format!(
        "<form method=\"post\" action=\"/refresh\" class=\"d-inline\"><button class=\"btn btn-primary btn-sm\"{disabled}>{label}</button></form>\n"
    ));
    out.push_str("</div>\n</header>\n");
}

fn render_filter(out: &mut String, current: FilterMode) {
    out.push_str("<nav class=\"btn-group mb-2\">\n");
    for mode in FilterMode::ALL_MODES {
        let class = if mode == current {
            "btn btn-sm btn-secondary"
        } else {
            "btn btn-sm btn-outline-secondary"
        };
        out.push_str(&format!(
            "<a class=\"{class}\" href=\"/?filter={m}\">{m}</a>\n",
            m = mode.as_str()
        ));
    }
    out.push_str("</nav>\n");
}

fn render_table(out: &mut String, v: &DashboardView) {
    if v.loading {
        out.push_str("<p class=\"text-muted\">Loading news&hellip;</p>\n");
        return;
    }
    if v.no_news {
        out.push_str("<p class=\"text-muted\">No news articles available.</p>\n");
        return;
    }

    out.push_str(&format!(
        "<p class=\"small text-muted\">Showing {} of {} articles</p>\n",
        v.filtered_count, v.total_count
    ));
    out.push_str("<table class=\"table table-hover\">\n<thead><tr><th>Title</th><th>Type</th><th>Published</th><th>Source</th></tr></thead>\n<tbody>\n");
    for row in &v.rows {
        render_row(out, row);
    }
    if v.no_matches {
        out.push_str("<tr><td colspan=\"4\" class=\"text-center text-muted py-4\"><h6>No articles match the current filter</h6><p class=\"small\">Try selecting a different filter option</p></td></tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn render_row(out: &mut String, r: &ArticleRow) {
    out.push_str(&format!(
        "<tr><td><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></td><td><span class=\"{}\">{}</span></td><td class=\"text-muted\">{}</td><td class=\"text-muted small\">{}</td></tr>\n",
        encode_double_quoted_attribute(&r.link),
        encode_text(&r.title),
        r.badge_class,
        encode_text(r.type_label),
        encode_text(&r.published),
        encode_text(&r.source),
    ));
}

fn render_sidebar(out: &mut String, heading: &str, entries: &[SidebarEntry], empty: &str) {
    out.push_str(&format!("<h2 class=\"h6\">{heading}</h2>\n"));
    if entries.is_empty() {
        out.push_str(&format!("<p class=\"text-muted small\">{empty}</p>\n"));
        return;
    }
    out.push_str("<ul class=\"list-unstyled\">\n");
    for e in entries {
        out.push_str(&format!(
            "<li class=\"d-flex justify-content-between\"><span class=\"text-truncate\">{}</span><span class=\"badge bg-light text-dark\">{}</span></li>\n",
            encode_text(&e.label),
            e.count
        ));
    }
    out.push_str("</ul>\n");
}
