// src/dashboard/notify.rs
//! Transient user-facing notifications ("toasts"). Each one expires after a
//! fixed time-to-live; expired entries are pruned whenever a new one arrives.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_TTL_SECS: i64 = 5;

/// Hard cap so a flapping backend cannot grow the queue without bound.
const MAX_PENDING: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

impl Level {
    /// Bootstrap alert flavour used by the HTML page.
    pub fn alert_class(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Notifications {
    ttl: Duration,
    next_id: u64,
    items: VecDeque<Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}

impl Notifications {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs),
            next_id: 1,
            items: VecDeque::new(),
        }
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        self.prune(now);
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(Notification {
            id,
            level,
            message: message.into(),
            created_at: now,
        });
        while self.items.len() > MAX_PENDING {
            self.items.pop_front();
        }
        id
    }

    /// Notifications still visible at `now`, oldest first.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.items
            .iter()
            .filter(|n| now - n.created_at < self.ttl)
            .cloned()
            .collect()
    }

    pub fn prune(&mut self, now: DateTime<Utc>) {
        while let Some(front) = self.items.front() {
            if now - front.created_at >= self.ttl {
                self.items.pop_front();
            } else {
                break;
            }
        }
    }
}
