//! Upstream article-search provider.
//!
//! The real provider is a NewsAPI-style `/everything` endpoint returning a
//! JSON body of raw articles. It is treated as an opaque collaborator: its
//! query syntax, rate limits, and result schema are outside our control, so
//! the wire structs below only name the fields we read.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::error::AggregateError;

/// A single article, immutable once fetched.
///
/// `id` is derived from the provider source id plus the publish timestamp and
/// is therefore collision-prone when one source publishes two items at the
/// identical timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub image: Option<String>,
    pub source: String,
    pub published_at: String,
    pub category: String,
}

#[async_trait]
pub trait ArticleProvider: Send + Sync {
    /// Fetch up to one page of raw articles for `query`, tagging each result
    /// with `category`.
    async fn search(&self, query: &str, category: &str) -> Result<Vec<Article>, AggregateError>;

    fn name(&self) -> &'static str;
}

/// Raw results per page requested from the provider.
pub const PAGE_SIZE: usize = 25;

// ---- NewsAPI wire schema (only the fields we read) ----

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    source: RawSource,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    id: Option<String>,
    name: Option<String>,
}

/// HTTP client for the NewsAPI `/everything` search endpoint.
pub struct NewsApiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsApiProvider {
    pub fn new(cfg: &ServerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: cfg.news_api_base_url.clone(),
            api_key: cfg.news_api_key.clone(),
        }
    }

    fn map_article(raw: RawArticle, category: &str) -> Article {
        let published_at = raw.published_at.unwrap_or_default();
        let source_id = raw.source.id.as_deref().unwrap_or("unknown");
        Article {
            id: format!("{source_id}-{published_at}"),
            title: raw.title.unwrap_or_default(),
            description: raw.description,
            content: raw.content,
            url: raw.url.unwrap_or_default(),
            image: raw.url_to_image,
            source: raw.source.name.unwrap_or_default(),
            published_at,
            category: category.to_string(),
        }
    }
}

#[async_trait]
impl ArticleProvider for NewsApiProvider {
    async fn search(&self, query: &str, category: &str) -> Result<Vec<Article>, AggregateError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AggregateError::Configuration("NEWS_API_KEY not configured".to_string())
        })?;

        let url = format!("{}/everything", self.base_url);
        debug!(target: "provider", %query, "querying news search endpoint");

        let page_size = PAGE_SIZE.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .await?;

        let body: SearchResponse = resp.json().await.map_err(|e| {
            warn!(target: "provider", error = %e, "malformed provider body");
            AggregateError::Provider(e.to_string())
        })?;

        if body.status != "ok" {
            let msg = body
                .message
                .unwrap_or_else(|| format!("provider returned status {}", body.status));
            warn!(target: "provider", %msg, "provider rejected request");
            return Err(AggregateError::Provider(msg));
        }

        Ok(body
            .articles
            .into_iter()
            .map(|raw| Self::map_article(raw, category))
            .collect())
    }

    fn name(&self) -> &'static str {
        "NewsAPI"
    }
}
