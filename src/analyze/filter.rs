// src/analyze/filter.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analyze::classify::{classify, ClassifiedType};
use crate::article::Article;

/// Filter control on the dashboard; exactly one mode is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    /// Expansions *and* announcement-only articles; excludes plain treasury activity.
    Expansions,
    Announcements,
}

impl FilterMode {
    pub const ALL_MODES: [FilterMode; 3] =
        [FilterMode::All, FilterMode::Expansions, FilterMode::Announcements];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Expansions => "expansions",
            FilterMode::Announcements => "announcements",
        }
    }

    pub fn admits(self, ty: ClassifiedType) -> bool {
        use ClassifiedType::*;
        match self {
            FilterMode::All => true,
            FilterMode::Expansions => {
                matches!(ty, Expansion | NewAnnouncement | ExpansionAndAnnouncement)
            }
            FilterMode::Announcements => matches!(ty, NewAnnouncement | ExpansionAndAnnouncement),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter mode '{0}'")]
pub struct UnknownFilterMode(pub String);

impl FromStr for FilterMode {
    type Err = UnknownFilterMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "expansions" => Ok(FilterMode::Expansions),
            "announcements" => Ok(FilterMode::Announcements),
            _ => Err(UnknownFilterMode(s.to_string())),
        }
    }
}

/// Order-preserving subsequence of `articles` admitted by `mode`.
pub fn filter_articles(articles: &[Article], mode: FilterMode) -> Vec<Article> {
    if mode == FilterMode::All {
        return articles.to_vec();
    }
    articles
        .iter()
        .filter(|a| mode.admits(classify(a)))
        .cloned()
        .collect()
}
