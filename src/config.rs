// src/config.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dashboard::scheduler::SchedulerCfg;

pub const ENV_CONFIG_PATH: &str = "DASHBOARD_CONFIG_PATH";
pub const ENV_BACKEND_URL: &str = "DASHBOARD_BACKEND_URL";
pub const ENV_BIND: &str = "DASHBOARD_BIND";

pub const DEFAULT_TOML_PATH: &str = "config/dashboard.toml";
pub const DEFAULT_JSON_PATH: &str = "config/dashboard.json";

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_news_interval_secs() -> u64 {
    300
}
fn default_full_interval_secs() -> u64 {
    1800
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Base URL of the news backend serving `/api/news`, `/api/stats`, `/api/refresh`.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Address of the local dashboard server.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_news_interval_secs")]
    pub news_interval_secs: u64,
    #[serde(default = "default_full_interval_secs")]
    pub full_interval_secs: u64,
    /// Per-request timeout; unset keeps the HTTP client defaults.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub metrics_enabled: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            bind_addr: default_bind_addr(),
            news_interval_secs: default_news_interval_secs(),
            full_interval_secs: default_full_interval_secs(),
            request_timeout_secs: None,
            metrics_enabled: false,
        }
    }
}

impl DashboardConfig {
    /// Load from an explicit path. TOML or JSON, chosen by extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading dashboard config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, &ext)
            .with_context(|| format!("parsing dashboard config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolution order:
    /// 1) $DASHBOARD_CONFIG_PATH
    /// 2) config/dashboard.toml
    /// 3) config/dashboard.json
    /// 4) built-in defaults
    ///
    /// `DASHBOARD_BACKEND_URL` / `DASHBOARD_BIND` override the file either way.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_TOML_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_TOML_PATH))?
        } else if Path::new(DEFAULT_JSON_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_JSON_PATH))?
        } else {
            Self::default()
        };

        if let Some(url) = non_empty_env(ENV_BACKEND_URL) {
            cfg.backend_url = url;
        }
        if let Some(bind) = non_empty_env(ENV_BIND) {
            cfg.bind_addr = bind;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.news_interval_secs == 0 || self.full_interval_secs == 0 {
            bail!("refresh intervals must be positive");
        }
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            bail!("backend_url must be an http(s) URL, got '{}'", self.backend_url);
        }
        Ok(())
    }

    pub fn scheduler(&self) -> SchedulerCfg {
        SchedulerCfg {
            news_interval: Duration::from_secs(self.news_interval_secs),
            full_interval: Duration::from_secs(self.full_interval_secs),
        }
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<DashboardConfig> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        _ => toml::from_str(s)
            .map_err(anyhow::Error::from)
            .or_else(|_| serde_json::from_str(s).map_err(anyhow::Error::from))
            .map_err(|_| anyhow!("unsupported dashboard config format")),
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = parse_config(r#"backend_url = "http://news:5000""#, "toml").unwrap();
        assert_eq!(cfg.backend_url, "http://news:5000");
        assert_eq!(cfg.news_interval_secs, 300);
        assert_eq!(cfg.full_interval_secs, 1800);
        assert!(cfg.request_timeout_secs.is_none());
    }

    #[test]
    fn json_without_extension_hint() {
        let cfg = parse_config(r#"{"news_interval_secs": 60, "metrics_enabled": true}"#, "").unwrap();
        assert_eq!(cfg.news_interval_secs, 60);
        assert!(cfg.metrics_enabled);
    }

    #[test]
    fn unknown_keys_and_zero_intervals_rejected() {
        assert!(parse_config("poll = 3", "toml").is_err());
        let cfg = DashboardConfig {
            news_interval_secs: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn scheduler_periods_follow_config() {
        let s = DashboardConfig::default().scheduler();
        assert_eq!(s.news_interval, Duration::from_secs(300));
        assert_eq!(s.full_interval, Duration::from_secs(1800));
    }
}
