// src/analyze/normalize.rs
//! Title normalizer: maps a headline to the key used for duplicate detection.
//!
//! Two outlets reporting the same treasury event should land on the same key,
//! e.g. `"Breaking: Tesla buys 500 BTC - Reuters"` and `"Tesla Buys 500 BTC"`
//! both become `"tesla 500 btc"`. Keys are never displayed.
//!
//! Pipeline:
//! 1) lowercase
//! 2) strip one boilerplate prefix (first match), then trim
//! 3) cut a trailing ` - Publisher` suffix
//! 4) structured extraction, first matching rule wins (see [`EXTRACTION_RULES`])
//! 5) otherwise collapse whitespace

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Boilerplate headline prefixes, checked in this order.
pub const BOILERPLATE_PREFIXES: [&str; 5] = [
    "bitcoin news today:",
    "crypto news:",
    "breaking:",
    "latest:",
    "update:",
];

const PUBLISHER_SEPARATOR: &str = " - ";

/// Fallback key when a MicroStrategy headline carries neither a quantity nor an action.
pub const MICROSTRATEGY_FALLBACK: &str = "microstrategy announcement";

// Word boundaries are ASCII-only: `é` after `btc` still ends the token.
static RE_COMPANY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u:\b)(strategy|matador|capital\s+b|bitmine|tether|microstrategy|tesla|square|coinbase|binance)(?-u:\b)",
    )
    .expect("company regex")
});

static RE_ACQUISITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u:\b)(buys?|adds?|acquires?|purchases?)\s+([0-9]+)\s*(btc|bitcoin|eth|ethereum)(?-u:\b)",
    )
    .expect("acquisition regex")
});

static RE_QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)([0-9]+)\s*(btc|bitcoin|eth|ethereum)(?-u:\b)").expect("quantity regex")
});

static RE_ACTION_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u:\b)(announces?|announced|adds?|added|acquires?|acquired|buys?|bought|purchases?|purchased|expands?|expanded|increases?|increased|boosts?|boosted)(?-u:\b)",
    )
    .expect("action verb regex")
});

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Announcement-style phrasings that identify a MicroStrategy headline as an action.
static MICROSTRATEGY_ACTIONS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        (
            "announcement_verb",
            r"(?-u:\b)(announces?|announced)\s+(?:that\s+)?(?:it\s+)?(?:has\s+)?(?:will\s+)?(?:plans\s+to\s+)?(?:to\s+)?(?:add|acquire|buy|purchase|expand|increase)",
        ),
        (
            "acquisition_of_asset",
            r"(?-u:\b)(adds?|added|acquires?|acquired|buys?|bought|purchases?|purchased)\s+(?:an?\s+)?(?:additional\s+)?(?:more\s+)?(?:bitcoin|btc|ethereum|eth)",
        ),
        (
            "treasury_growth",
            r"(?-u:\b)(expands?|expanded|increases?|increased|boosts?|boosted)\s+(?:its\s+)?(?:treasury|holdings|reserves|portfolio)",
        ),
    ]
    .into_iter()
    .map(|(name, pat)| (name, Regex::new(pat).expect("microstrategy action regex")))
    .collect()
});

type Extractor = fn(&str, &str) -> Option<String>;

/// Structured extraction rules in priority order.
/// Each receives the cleaned title and the matched company token.
pub const EXTRACTION_RULES: [(&str, Extractor); 3] = [
    ("company_acquisition", company_acquisition),
    ("microstrategy", microstrategy),
    ("company_quantity", company_quantity),
];

/// Normalize a raw title into its deduplication key.
pub fn normalize_title(title: &str) -> String {
    let cleaned = clean_title(title);

    if let Some(company) = RE_COMPANY.captures(&cleaned).map(|c| c[1].to_string()) {
        for (name, rule) in EXTRACTION_RULES.iter() {
            if let Some(key) = rule(&cleaned, &company) {
                tracing::trace!(target: "normalize", rule = name, %key, "structured key");
                return key;
            }
        }
    }

    RE_WS.replace_all(&cleaned, " ").trim().to_string()
}

/// Steps 1–3: lowercase, drop one boilerplate prefix, drop the publisher suffix.
fn clean_title(title: &str) -> String {
    let mut out = title.to_lowercase();

    if let Some(prefix) = BOILERPLATE_PREFIXES.iter().find(|p| out.starts_with(**p)) {
        out = out[prefix.len()..].trim().to_string();
    }

    if let Some(idx) = out.find(PUBLISHER_SEPARATOR) {
        out = out[..idx].trim().to_string();
    }

    out
}

fn quantity_key(owner: &str, caps: &Captures<'_>, amount: usize, asset: usize) -> String {
    format!("{} {} {}", owner, &caps[amount], &caps[asset])
}

fn company_acquisition(text: &str, company: &str) -> Option<String> {
    RE_ACQUISITION
        .captures(text)
        .map(|caps| quantity_key(company, &caps, 2, 3))
}

fn microstrategy(text: &str, company: &str) -> Option<String> {
    if company != "strategy" && company != "microstrategy" {
        return None;
    }

    if let Some(caps) = RE_QUANTITY.captures(text) {
        return Some(quantity_key("microstrategy", &caps, 1, 2));
    }

    let announced = MICROSTRATEGY_ACTIONS.iter().any(|(_, re)| re.is_match(text));
    if announced {
        if let Some(action) = RE_ACTION_VERB.captures(text) {
            return Some(format!("microstrategy {}", &action[1]));
        }
    }

    Some(MICROSTRATEGY_FALLBACK.to_string())
}

fn company_quantity(text: &str, company: &str) -> Option<String> {
    RE_QUANTITY
        .captures(text)
        .map(|caps| quantity_key(company, &caps, 1, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisition_headlines_reduce_to_company_amount_asset() {
        assert_eq!(normalize_title("Strategy Buys 155 BTC"), "strategy 155 btc");
        assert_eq!(
            normalize_title("Breaking: Tesla adds 500 Bitcoin - Reuters"),
            "tesla 500 bitcoin"
        );
        assert_eq!(
            normalize_title("Capital B purchases 2000 ETH for treasury"),
            "capital b 2000 eth"
        );
    }

    #[test]
    fn ethereum_is_not_truncated_to_eth() {
        assert_eq!(
            normalize_title("BitMine acquires 1000 ethereum"),
            "bitmine 1000 ethereum"
        );
    }

    #[test]
    fn microstrategy_quantity_wins_without_acquisition_verb() {
        assert_eq!(
            normalize_title("MicroStrategy now holds 597325 BTC"),
            "microstrategy 597325 btc"
        );
        // `strategy` token is reported under the canonical name in this branch
        assert_eq!(
            normalize_title("Strategy's stash tops 600000 bitcoin"),
            "microstrategy 600000 bitcoin"
        );
    }

    #[test]
    fn microstrategy_action_uses_first_action_verb() {
        assert_eq!(
            normalize_title("MicroStrategy announces plans to buy more bitcoin"),
            "microstrategy announces"
        );
        assert_eq!(
            normalize_title("Strategy expanded its treasury again"),
            "microstrategy expanded"
        );
    }

    #[test]
    fn microstrategy_without_signal_falls_back() {
        assert_eq!(
            normalize_title("Michael Saylor on Strategy's future - CoinDesk"),
            MICROSTRATEGY_FALLBACK
        );
    }

    #[test]
    fn company_with_bare_quantity() {
        assert_eq!(
            normalize_title("Tether now holds 100000 BTC in reserves"),
            "tether 100000 btc"
        );
    }

    #[test]
    fn unstructured_titles_collapse_whitespace() {
        assert_eq!(
            normalize_title("Update:   Bitcoin   treasuries\tgrow  - The Block"),
            "bitcoin treasuries grow"
        );
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn only_first_prefix_is_stripped() {
        assert_eq!(
            normalize_title("Breaking: Update: ETF inflows"),
            "update: etf inflows"
        );
    }

    #[test]
    fn suffix_cut_at_first_separator() {
        assert_eq!(normalize_title("A - B - C"), "a");
    }

    #[test]
    fn company_token_needs_word_boundary() {
        // "strategy" inside "microstrategy" must not shadow the longer token
        assert_eq!(
            normalize_title("MicroStrategy buys 155 BTC"),
            "microstrategy 155 btc"
        );
        // "squared" is not "square"
        assert_eq!(normalize_title("Squared 10 BTC"), "squared 10 btc");
    }
}
