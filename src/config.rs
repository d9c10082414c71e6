//! Server configuration, read from the environment (with `.env` support via
//! dotenvy in the binary entrypoint).

use std::env;

pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_NEWS_API_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_SOURCE_POOLS_PATH: &str = "SOURCE_POOLS_PATH";

pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SOURCE_POOLS_PATH: &str = "config/source_pools.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Provider credential. Its absence is only fatal once a fetch is
    /// attempted, so the server still boots (and `/health` answers) without
    /// one.
    pub news_api_key: Option<String>,
    pub news_api_base_url: String,
    pub port: u16,
    pub source_pools_path: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            news_api_key: env::var(ENV_NEWS_API_KEY).ok().filter(|s| !s.is_empty()),
            news_api_base_url: env::var(ENV_NEWS_API_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_NEWS_API_BASE_URL.to_string()),
            port: env::var(ENV_PORT)
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            source_pools_path: env::var(ENV_SOURCE_POOLS_PATH)
                .unwrap_or_else(|_| DEFAULT_SOURCE_POOLS_PATH.to_string()),
        }
    }
}
