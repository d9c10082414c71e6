//! Article selection and weighting.
//!
//! Given a category and a legacy weight, builds a provider query, fetches one
//! page of articles, drops likely-paywalled items, and re-orders the list so
//! the requested proportion of legacy-sourced articles comes first. Every
//! call is stateless; identical inputs against an unchanged upstream pool
//! yield identical output.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::error::AggregateError;
use crate::provider::{Article, ArticleProvider, PAGE_SIZE};
use crate::sources::{MediaAge, SourcePoolsConfig};

pub const DEFAULT_CATEGORY: &str = "tmt";
pub const DEFAULT_WEIGHT: u8 = 50;

/// Fixed category → provider query table. Unknown categories fall back to
/// the default category's query.
static CATEGORY_QUERIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("tmt", "technology OR telecom OR media"),
        ("fintech", "fintech OR banking OR cryptocurrency OR payments"),
        ("healthcare", "healthcare OR pharma OR biotech OR medical"),
        ("manufacturing", "manufacturing OR industrial OR supply chain"),
        ("retail", "retail OR e-commerce OR consumer goods"),
        ("media", "media OR entertainment OR publishing"),
        ("automotive", "automotive OR electric vehicles OR autonomous"),
        ("energy", "energy OR power OR renewable OR oil gas"),
    ])
});

pub fn query_for_category(category: &str) -> &'static str {
    let key = category.to_lowercase();
    CATEGORY_QUERIES
        .get(key.as_str())
        .or_else(|| CATEGORY_QUERIES.get(DEFAULT_CATEGORY))
        .copied()
        .unwrap_or_default()
}

/// Heuristic paywall detector: drops descriptions carrying the provider's
/// "[+]" truncation marker or mentioning a subscription. Not exhaustive, not
/// configurable per source. Articles without a description are kept.
pub fn is_likely_paywalled(article: &Article) -> bool {
    match article.description.as_deref() {
        Some(d) => {
            let d = d.to_lowercase();
            d.contains("[+]") || d.contains("subscription")
        }
        None => false,
    }
}

/// Re-order `articles` so roughly `weight`% of the page is legacy-sourced.
///
/// A weight of 50 means "no reordering by media age": the input comes back
/// unchanged. Any other weight partitions the input into legacy, new-age,
/// and other buckets (provider order preserved within each), then fills
/// `round(weight/100 * PAGE_SIZE)` slots from the legacy bucket and the rest
/// from the new-age bucket. Slots are not reallocated when a bucket runs
/// short, so the result can come up below a full page even when eligible
/// articles remain in the other buckets.
pub fn apply_media_weighting(
    articles: Vec<Article>,
    weight: u8,
    pools: &SourcePoolsConfig,
) -> Vec<Article> {
    if weight == 50 {
        return articles;
    }

    let mut legacy = Vec::new();
    let mut new_age = Vec::new();
    let mut other = Vec::new();
    for a in articles {
        match pools.classify(&a.source) {
            MediaAge::Legacy => legacy.push(a),
            MediaAge::NewAge => new_age.push(a),
            MediaAge::Other => other.push(a),
        }
    }

    let legacy_slots = ((f64::from(weight) / 100.0) * PAGE_SIZE as f64).round() as usize;
    let new_age_slots = PAGE_SIZE - legacy_slots;
    let other_slots = PAGE_SIZE - legacy_slots - new_age_slots;

    debug!(
        target: "aggregator",
        weight,
        legacy = legacy.len(),
        new_age = new_age.len(),
        other = other.len(),
        legacy_slots,
        new_age_slots,
        "applying media weighting"
    );

    let mut result: Vec<Article> = legacy
        .into_iter()
        .take(legacy_slots)
        .chain(new_age.into_iter().take(new_age_slots))
        .chain(other.into_iter().take(other_slots))
        .collect();
    result.truncate(PAGE_SIZE);
    result
}

/// The aggregation service: provider + source pools, shared across requests.
pub struct NewsAggregator {
    provider: Arc<dyn ArticleProvider>,
    pools: SourcePoolsConfig,
}

impl NewsAggregator {
    pub fn new(provider: Arc<dyn ArticleProvider>, pools: SourcePoolsConfig) -> Self {
        Self { provider, pools }
    }

    /// Fetch, filter, and weight one page of articles for `category`.
    pub async fn fetch_news(
        &self,
        category: &str,
        weight: u8,
    ) -> Result<Vec<Article>, AggregateError> {
        let query = query_for_category(category);
        let raw = self.provider.search(query, category).await?;
        let fetched = raw.len();

        let filtered: Vec<Article> = raw
            .into_iter()
            .filter(|a| !is_likely_paywalled(a))
            .collect();
        let kept = filtered.len();

        let mut weighted = apply_media_weighting(filtered, weight, &self.pools);
        weighted.truncate(PAGE_SIZE);

        info!(
            target: "aggregator",
            provider = self.provider.name(),
            category,
            weight,
            fetched,
            paywalled = fetched - kept,
            returned = weighted.len(),
            "aggregated news page"
        );
        Ok(weighted)
    }
}
