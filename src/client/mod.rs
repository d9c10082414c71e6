//! The browsing client: local vote/removal state and fetch orchestration.

pub mod fetcher;
pub mod store;

pub use fetcher::{FeedState, HttpBackend, NewsBackend, NewsFetcher};
pub use store::{PreferenceStore, ViewPrefs, VoteRecord};
