// End-to-end aggregator tests against a fixture provider: the testable
// properties of the weighting policy as seen through `fetch_news`.

use std::sync::Arc;

use async_trait::async_trait;

use news_balance::error::AggregateError;
use news_balance::provider::{Article, ArticleProvider};
use news_balance::sources::SourcePoolsConfig;
use news_balance::NewsAggregator;

fn article(source: &str, n: usize) -> Article {
    Article {
        id: format!("{source}-{n}"),
        title: format!("story {n}"),
        description: Some("plain summary".into()),
        content: None,
        url: format!("https://example.com/{n}"),
        image: None,
        source: source.to_string(),
        published_at: "2024-05-01T12:00:00Z".into(),
        category: "tmt".into(),
    }
}

struct FixtureProvider {
    pool: Vec<Article>,
}

#[async_trait]
impl ArticleProvider for FixtureProvider {
    async fn search(&self, _query: &str, _category: &str) -> Result<Vec<Article>, AggregateError> {
        Ok(self.pool.clone())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

fn aggregator_over(pool: Vec<Article>) -> NewsAggregator {
    NewsAggregator::new(
        Arc::new(FixtureProvider { pool }),
        SourcePoolsConfig::default(),
    )
}

/// A mixed pool: 30 articles alternating legacy / new-age / other.
fn mixed_pool() -> Vec<Article> {
    (0..30)
        .map(|n| match n % 3 {
            0 => article("CNN", n),
            1 => article("TechCrunch", n),
            _ => article("Local Gazette", n),
        })
        .collect()
}

#[tokio::test]
async fn weight_fifty_equals_provider_filtered_order() {
    let pool = mixed_pool();
    let agg = aggregator_over(pool.clone());
    let out = agg.fetch_news("tmt", 50).await.unwrap();
    // Page-capped, otherwise untouched.
    let expected: Vec<String> = pool.iter().take(25).map(|a| a.id.clone()).collect();
    let got: Vec<String> = out.iter().map(|a| a.id.clone()).collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn weight_hundred_yields_all_legacy_when_pool_allows() {
    let mut pool: Vec<Article> = (0..25).map(|n| article("CNN", n)).collect();
    pool.extend((25..35).map(|n| article("TechCrunch", n)));
    let agg = aggregator_over(pool);
    let out = agg.fetch_news("tmt", 100).await.unwrap();
    assert_eq!(out.len(), 25);
    assert!(out.iter().all(|a| a.source == "CNN"));
}

#[tokio::test]
async fn weight_zero_yields_all_new_age_when_pool_allows() {
    let mut pool: Vec<Article> = (0..25).map(|n| article("TechCrunch", n)).collect();
    pool.extend((25..35).map(|n| article("CNN", n)));
    let agg = aggregator_over(pool);
    let out = agg.fetch_news("tmt", 0).await.unwrap();
    assert_eq!(out.len(), 25);
    assert!(out.iter().all(|a| a.source == "TechCrunch"));
}

#[tokio::test]
async fn paywall_marker_excludes_article_any_case() {
    let mut pool = mixed_pool();
    pool[0].description = Some("teaser [+] 1234 chars".into());
    pool[1].description = Some("Get a SUBSCRIPTION today".into());
    let agg = aggregator_over(pool);
    let out = agg.fetch_news("tmt", 50).await.unwrap();
    assert!(out.iter().all(|a| a.id != "CNN-0"));
    assert!(out.iter().all(|a| a.id != "TechCrunch-1"));
}

#[tokio::test]
async fn identical_inputs_give_identical_output() {
    let agg = aggregator_over(mixed_pool());
    let first = agg.fetch_news("fintech", 72).await.unwrap();
    let second = agg.fetch_news("fintech", 72).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_category_still_returns_results() {
    let agg = aggregator_over(mixed_pool());
    let out = agg.fetch_news("definitely-not-a-category", 50).await.unwrap();
    assert!(!out.is_empty());
}
