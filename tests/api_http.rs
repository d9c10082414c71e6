// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/news (success envelope, param clamping, error envelope)

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use news_balance::api::{create_router, AppState};
use news_balance::error::AggregateError;
use news_balance::provider::{Article, ArticleProvider};
use news_balance::sources::SourcePoolsConfig;
use news_balance::NewsAggregator;

const BODY_LIMIT: usize = 1024 * 1024;

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

/// Provider stub returning a fixed pool, recording nothing.
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

/// Provider stub that always fails like a missing credential.
struct UnconfiguredProvider;

#[async_trait]
impl ArticleProvider for UnconfiguredProvider {
    async fn search(&self, _query: &str, _category: &str) -> Result<Vec<Article>, AggregateError> {
        Err(AggregateError::Configuration(
            "NEWS_API_KEY not configured".into(),
        ))
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}

fn router_with(provider: Arc<dyn ArticleProvider>) -> Router {
    let aggregator = Arc::new(NewsAggregator::new(provider, SourcePoolsConfig::default()));
    create_router(AppState::new(aggregator))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse json body");
    (status, v)
}

#[tokio::test]
async fn health_returns_ok_with_timestamp() {
    let app = router_with(Arc::new(FixtureProvider { pool: vec![] }));
    let (status, v) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");
    assert!(v["timestamp"].is_string());
}

#[tokio::test]
async fn news_success_envelope_has_data_count_timestamp() {
    let pool = vec![article("CNN", 0), article("TechCrunch", 1)];
    let app = router_with(Arc::new(FixtureProvider { pool }));

    let (status, v) = get_json(app, "/api/news?category=tmt&legacyWeight=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["count"], 2);
    assert_eq!(v["data"].as_array().unwrap().len(), 2);
    assert!(v["timestamp"].is_string());
    // weight 50: provider order preserved
    assert_eq!(v["data"][0]["id"], "CNN-0");
    assert_eq!(v["data"][1]["id"], "TechCrunch-1");
}

#[tokio::test]
async fn out_of_range_weight_is_clamped_not_rejected() {
    let pool: Vec<Article> = (0..5).map(|n| article("CNN", n)).collect();
    let app = router_with(Arc::new(FixtureProvider { pool }));

    // 250 clamps to 100: all-legacy ordering, still a 200.
    let (status, v) = get_json(app, "/api/news?legacyWeight=250").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["count"], 5);
}

#[tokio::test]
async fn unparsable_weight_defaults_to_fifty() {
    let pool = vec![article("Wired", 0), article("CNN", 1)];
    let app = router_with(Arc::new(FixtureProvider { pool }));

    let (status, v) = get_json(app, "/api/news?legacyWeight=banana").await;
    assert_eq!(status, StatusCode::OK);
    // Default weight 50 preserves provider order.
    assert_eq!(v["data"][0]["id"], "Wired-0");
}

#[tokio::test]
async fn paywalled_articles_never_reach_the_wire() {
    let mut gated = article("CNN", 0);
    gated.description = Some("Full story [+] 2000 chars".into());
    let pool = vec![gated, article("CNN", 1)];
    let app = router_with(Arc::new(FixtureProvider { pool }));

    let (_, v) = get_json(app, "/api/news").await;
    assert_eq!(v["count"], 1);
    assert_eq!(v["data"][0]["id"], "CNN-1");
}

#[tokio::test]
async fn provider_failure_maps_to_500_error_envelope() {
    let app = router_with(Arc::new(UnconfiguredProvider));
    let (status, v) = get_json(app, "/api/news").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v["success"], false);
    assert_eq!(v["error"], "NEWS_API_KEY not configured");
}
