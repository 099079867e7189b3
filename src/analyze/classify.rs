// src/analyze/classify.rs
//! Keyword classifier for treasury articles.
//!
//! Matching is plain substring search over `title + " " + description`,
//! lowercased. No word boundaries: "purchase" also hits "purchasers".

use serde::{Deserialize, Serialize};

use crate::article::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassifiedType {
    Expansion,
    NewAnnouncement,
    ExpansionAndAnnouncement,
    TreasuryActivity,
}

impl ClassifiedType {
    /// Human-readable label shown in the type badge.
    pub fn label(self) -> &'static str {
        match self {
            ClassifiedType::Expansion => "Expansion",
            ClassifiedType::NewAnnouncement => "New Announcement",
            ClassifiedType::ExpansionAndAnnouncement => "Expansion & Announcement",
            ClassifiedType::TreasuryActivity => "Treasury Activity",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            ClassifiedType::Expansion => "badge bg-success",
            ClassifiedType::NewAnnouncement => "badge bg-primary",
            ClassifiedType::ExpansionAndAnnouncement => "badge bg-warning text-dark",
            ClassifiedType::TreasuryActivity => "badge bg-secondary",
        }
    }
}

pub const PRIMARY_EXPANSION: &[&str] = &[
    "buys", "bought", "purchases", "purchased", "purchase", "acquires", "acquired",
    "acquisition", "adds", "added", "addition",
];

pub const SECONDARY_EXPANSION: &[&str] = &[
    "expands", "expanded", "expansion", "increases", "increased", "increase", "boosts",
    "boosted", "boost", "grows", "grew", "growth",
];

pub const PRIMARY_ANNOUNCEMENT: &[&str] = &[
    "announces", "announced", "announcement", "launches", "launched", "launch", "reveals",
    "revealed", "reveal", "unveils", "unveiled", "unveil",
];

pub const SECONDARY_ANNOUNCEMENT: &[&str] = &[
    "new", "fresh", "latest", "recent", "updates", "updated", "strategic", "investment",
    "portfolio",
];

/// Which vocabularies matched a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub primary_expansion: bool,
    pub secondary_expansion: bool,
    pub primary_announcement: bool,
    pub secondary_announcement: bool,
}

impl Signals {
    pub fn from_text(text: &str) -> Self {
        let t = text.to_lowercase();
        Self {
            primary_expansion: any_keyword(&t, PRIMARY_EXPANSION),
            secondary_expansion: any_keyword(&t, SECONDARY_EXPANSION),
            primary_announcement: any_keyword(&t, PRIMARY_ANNOUNCEMENT),
            secondary_announcement: any_keyword(&t, SECONDARY_ANNOUNCEMENT),
        }
    }
}

type Predicate = fn(&Signals) -> bool;

/// Resolution order. First predicate that holds decides the label.
pub const RULES: [(&str, Predicate, ClassifiedType); 6] = [
    (
        "primary_both",
        |s| s.primary_expansion && s.primary_announcement,
        ClassifiedType::ExpansionAndAnnouncement,
    ),
    ("primary_expansion", |s| s.primary_expansion, ClassifiedType::Expansion),
    (
        "primary_announcement",
        |s| s.primary_announcement,
        ClassifiedType::NewAnnouncement,
    ),
    (
        "secondary_both",
        |s| s.secondary_expansion && s.secondary_announcement,
        ClassifiedType::TreasuryActivity,
    ),
    ("secondary_expansion", |s| s.secondary_expansion, ClassifiedType::Expansion),
    (
        "secondary_announcement",
        |s| s.secondary_announcement,
        ClassifiedType::NewAnnouncement,
    ),
];

pub const DEFAULT_TYPE: ClassifiedType = ClassifiedType::TreasuryActivity;

fn any_keyword(text: &str, vocab: &[&str]) -> bool {
    vocab.iter().any(|k| text.contains(k))
}

/// Classify raw `title` / `description` text.
pub fn classify_text(title: &str, description: &str) -> ClassifiedType {
    let signals = Signals::from_text(&format!("{title} {description}"));
    RULES
        .iter()
        .find(|(_, pred, _)| pred(&signals))
        .map(|(_, _, ty)| *ty)
        .unwrap_or(DEFAULT_TYPE)
}

pub fn classify(article: &Article) -> ClassifiedType {
    classify_text(&article.title, article.description_or_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_expansion_only() {
        assert_eq!(classify_text("Tesla Acquires 500 BTC", ""), ClassifiedType::Expansion);
    }

    #[test]
    fn primary_announcement_only() {
        assert_eq!(
            classify_text("Coinbase Announces New Bitcoin Treasury Strategy", ""),
            ClassifiedType::NewAnnouncement
        );
    }

    #[test]
    fn both_primaries() {
        assert_eq!(
            classify_text("Firm announces it bought 10 BTC", ""),
            ClassifiedType::ExpansionAndAnnouncement
        );
    }

    #[test]
    fn secondary_rules_in_order() {
        // "growth" + "portfolio": both weak signals
        assert_eq!(
            classify_text("Treasury growth", "portfolio review"),
            ClassifiedType::TreasuryActivity
        );
        assert_eq!(classify_text("Holdings grew", ""), ClassifiedType::Expansion);
        assert_eq!(classify_text("Fresh look at reserves", ""), ClassifiedType::NewAnnouncement);
    }

    #[test]
    fn substring_matching_has_no_word_boundaries() {
        // "renewal" contains "new"
        assert_eq!(classify_text("License renewal", ""), ClassifiedType::NewAnnouncement);
    }

    #[test]
    fn description_contributes() {
        assert_eq!(
            classify_text("Quarterly report", "the company purchased bitcoin"),
            ClassifiedType::Expansion
        );
    }

    #[test]
    fn default_is_treasury_activity() {
        assert_eq!(classify_text("", ""), ClassifiedType::TreasuryActivity);
        assert_eq!(classify_text("Saylor speaks", ""), ClassifiedType::TreasuryActivity);
    }

    #[test]
    fn labels_match_badges() {
        assert_eq!(ClassifiedType::ExpansionAndAnnouncement.label(), "Expansion & Announcement");
        assert!(ClassifiedType::TreasuryActivity.badge_class().contains("bg-secondary"));
    }
}
