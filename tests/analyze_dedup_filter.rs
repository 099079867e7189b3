// tests/analyze_dedup_filter.rs
use crypto_treasury_dashboard::{deduplicate, filter_articles, Article, FilterMode};

fn corpus() -> Vec<Article> {
    vec![
        Article::new("Tesla Acquires 500 BTC", "https://a/1"),
        Article::new("Breaking: Tesla buys 500 BTC - Reuters", "https://b/1"),
        Article::new("Coinbase Announces Treasury Plan", "https://a/2"),
        Article::new("Totally different headline", "https://a/2"),
        Article::new("Firm announces it bought 10 BTC", "https://a/3"),
        Article::new("Holdings grew", "https://a/4"),
        Article::new("Saylor speaks", "https://a/5"),
    ]
}

#[test]
fn identical_links_drop_the_second_article() {
    let arts = vec![
        Article::new("First title", "https://same/1"),
        Article::new("Second, unrelated title", "https://same/1"),
    ];
    let kept = deduplicate(&arts);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].title, "First title");
}

#[test]
fn first_occurrence_wins_and_order_is_preserved() {
    let kept = deduplicate(&corpus());
    let links: Vec<_> = kept.iter().map(|a| a.link.as_str()).collect();
    assert_eq!(
        links,
        ["https://a/1", "https://a/2", "https://a/3", "https://a/4", "https://a/5"]
    );
}

#[test]
fn dedup_is_idempotent() {
    let once = deduplicate(&corpus());
    assert_eq!(deduplicate(&once), once);
}

#[test]
fn filter_modes_nest() {
    let arts = deduplicate(&corpus());
    let all = filter_articles(&arts, FilterMode::All);
    let exp = filter_articles(&arts, FilterMode::Expansions);
    let ann = filter_articles(&arts, FilterMode::Announcements);

    assert_eq!(all, arts);
    assert!(ann.iter().all(|a| exp.contains(a)));
    assert!(exp.iter().all(|a| all.contains(a)));
    assert_eq!(exp.len(), 4);
    assert_eq!(ann.len(), 2);
}

#[test]
fn expansions_mode_includes_announcement_only_articles() {
    let arts = vec![Article::new("Coinbase Announces Treasury Plan", "1")];
    assert_eq!(filter_articles(&arts, FilterMode::Expansions).len(), 1);
}
