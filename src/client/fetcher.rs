//! Fetch orchestration with superseding-request semantics.
//!
//! At most one fetch is outstanding at a time. Starting a new fetch aborts
//! the in-flight one and bumps a generation counter; a response that lands
//! with a stale generation applies nothing, so a slow response can never
//! overwrite state requested by a newer filter change. A cancelled fetch is
//! not an error and is never surfaced.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use crate::provider::Article;

/// What the client actually talks to. The production impl hits the
/// aggregation service over HTTP; tests inject stubs.
#[async_trait]
pub trait NewsBackend: Send + Sync + 'static {
    async fn fetch(&self, category: &str, legacy_weight: u8) -> Result<Vec<Article>, String>;
}

/// Success/error envelope returned by `GET /api/news`.
#[derive(Debug, Deserialize)]
struct NewsEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<Article>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP backend for the aggregation service.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl NewsBackend for HttpBackend {
    async fn fetch(&self, category: &str, legacy_weight: u8) -> Result<Vec<Article>, String> {
        let url = format!("{}/api/news", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("category", category),
                ("legacyWeight", &legacy_weight.to_string()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let body: NewsEnvelope = resp.json().await.map_err(|e| e.to_string())?;
        if body.success {
            Ok(body.data)
        } else {
            Err(body
                .error
                .unwrap_or_else(|| "Failed to fetch articles".to_string()))
        }
    }
}

/// Shared view of the latest completed fetch.
#[derive(Debug, Default, Clone)]
pub struct FeedState {
    pub articles: Vec<Article>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub loading: bool,
}

pub struct NewsFetcher {
    backend: Arc<dyn NewsBackend>,
    state: Arc<Mutex<FeedState>>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl NewsFetcher {
    pub fn new(backend: Arc<dyn NewsBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(FeedState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
        }
    }

    pub fn state(&self) -> FeedState {
        self.state.lock().expect("feed state poisoned").clone()
    }

    /// Start a fetch for (category, weight), superseding any in-flight one.
    /// Returns a handle the caller may await; awaiting is optional.
    pub fn refresh(&self, category: &str, legacy_weight: u8) -> JoinHandle<()> {
        let my_gen = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut guard = self.in_flight.lock().expect("in-flight lock poisoned");
            if let Some(prev) = guard.take() {
                debug!(target: "fetcher", "aborting superseded fetch");
                prev.abort();
            }
            let mut st = self.state.lock().expect("feed state poisoned");
            st.loading = true;
            st.error = None;
        }

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        let category = category.to_string();

        let handle = tokio::spawn(async move {
            let result = backend.fetch(&category, legacy_weight).await;

            let mut st = state.lock().expect("feed state poisoned");

            // A newer refresh has started; this response is stale. No error,
            // no state update. Checked under the state lock so a stale
            // response can never interleave with the newer request's write.
            if generation.load(Ordering::SeqCst) != my_gen {
                debug!(target: "fetcher", category, "dropping superseded response");
                return;
            }
            st.loading = false;
            match result {
                Ok(articles) => {
                    st.articles = articles;
                    st.last_refresh = Some(Utc::now());
                    st.error = None;
                }
                Err(msg) => {
                    // Previous articles are kept; only the error surfaces.
                    warn!(target: "fetcher", category, error = %msg, "fetch failed");
                    st.error = Some(msg);
                }
            }
        });

        *self.in_flight.lock().expect("in-flight lock poisoned") = Some(handle.abort_handle());
        handle
    }
}
