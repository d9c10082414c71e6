//! News Balance — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the aggregator, shared state, and
//! middleware.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_balance::api::{create_router, AppState};
use news_balance::config::ServerConfig;
use news_balance::provider::NewsApiProvider;
use news_balance::sources::SourcePoolsConfig;
use news_balance::NewsAggregator;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("news_balance=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = ServerConfig::from_env();
    if cfg.news_api_key.is_none() {
        tracing::warn!("NEWS_API_KEY is not set; /api/news will fail until it is configured");
    }

    let pools = SourcePoolsConfig::load_from_file(&cfg.source_pools_path);
    let provider = Arc::new(NewsApiProvider::new(&cfg));
    let aggregator = Arc::new(NewsAggregator::new(provider, pools));
    let router = create_router(AppState::new(aggregator));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "news aggregation service listening");

    axum::serve(listener, router).await?;
    Ok(())
}
