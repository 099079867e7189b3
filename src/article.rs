// src/article.rs
//! Wire types received from the news backend.
//!
//! Articles are immutable once received: the dashboard only changes which
//! derived collections (deduplicated, filtered) they belong to.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub published: Option<DateTime<Utc>>,
    /// Backend search query that surfaced the article.
    #[serde(default)]
    pub query: Option<String>,
}

impl Article {
    /// Convenience constructor used by tests and fixtures.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            link: link.into(),
            source: None,
            published: None,
            query: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = Some(published);
        self
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Body of `GET /api/news` and `GET /api/refresh`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsPayload {
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub articles: Vec<Article>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Body of `GET /api/stats`. Replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_articles: u64,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub top_sources: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub top_queries: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Parse a backend timestamp: RFC 3339, naive ISO-8601, or epoch seconds.
///
/// The backend writes naive timestamps in its host's local time, so they are
/// read as local time here too.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(local_to_utc(&naive));
        }
    }
    s.parse::<f64>().ok().and_then(epoch_to_utc)
}

// A wall-clock time skipped by a DST jump has no local reading; fall back to UTC.
fn local_to_utc(naive: &NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(naive))
}

fn epoch_to_utc(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    Utc.timestamp_opt(whole as i64, nanos).single()
}

fn de_timestamp<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(d)?;
    Ok(match v {
        serde_json::Value::String(s) => parse_timestamp(&s),
        serde_json::Value::Number(n) => n.as_f64().and_then(epoch_to_utc),
        _ => None,
    })
}

// `{"articles": null}` behaves like a missing field.
fn de_null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
