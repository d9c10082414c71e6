// Public library surface for integration tests (and potential reuse).

pub mod aggregator;
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod sources;

// ---- Re-exports for stable public API ----
pub use crate::aggregator::NewsAggregator;
pub use crate::api::{create_router, AppState};
pub use crate::client::{NewsFetcher, PreferenceStore};
pub use crate::error::AggregateError;
pub use crate::provider::{Article, ArticleProvider, NewsApiProvider};
pub use crate::sources::{MediaAge, SourcePoolsConfig};
