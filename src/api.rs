//! HTTP surface: the news endpoint and a health probe.
//!
//! Malformed query parameters are clamped or defaulted, never rejected; the
//! only failure mode visible to callers is a 500 with a JSON error envelope,
//! regardless of whether the underlying cause was a missing credential or an
//! upstream failure.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::aggregator::{NewsAggregator, DEFAULT_CATEGORY, DEFAULT_WEIGHT};
use crate::provider::Article;

#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<NewsAggregator>,
}

impl AppState {
    pub fn new(aggregator: Arc<NewsAggregator>) -> Self {
        Self { aggregator }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/news", get(get_news))
        .route("/health", get(health))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct NewsEnvelope {
    success: bool,
    data: Vec<Article>,
    count: usize,
    timestamp: String,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: String,
}

#[derive(Serialize)]
struct HealthOut {
    status: &'static str,
    timestamp: String,
}

/// Pull (category, weight) out of the raw query map, defaulting `category`
/// to "tmt" and clamping `legacyWeight` into [0, 100] with 50 for anything
/// unparsable.
fn parse_filters(params: &HashMap<String, String>) -> (String, u8) {
    let category = params
        .get("category")
        .filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let weight = params
        .get("legacyWeight")
        .and_then(|w| w.parse::<i64>().ok())
        .map(|w| w.clamp(0, 100) as u8)
        .unwrap_or(DEFAULT_WEIGHT);
    (category, weight)
}

async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<NewsEnvelope>, (StatusCode, Json<ErrorEnvelope>)> {
    let (category, weight) = parse_filters(&params);

    match state.aggregator.fetch_news(&category, weight).await {
        Ok(articles) => Ok(Json(NewsEnvelope {
            success: true,
            count: articles.len(),
            data: articles,
            timestamp: Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            error!(target: "api", category, weight, error = %e, "news fetch failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope {
                    success: false,
                    error: e.to_string(),
                }),
            ))
        }
    }
}

async fn health() -> Json<HealthOut> {
    Json(HealthOut {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}
