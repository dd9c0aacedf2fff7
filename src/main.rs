use std::sync::Arc;

use subreddit_recs::api::{create_router, AppState};
use subreddit_recs::config::Config;
use subreddit_recs::services::RedditClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("subreddit_recs=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let client = RedditClient::from_config(&config)?;
    let state = AppState::new(Arc::new(client), &config);

    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %config.bind_addr(),
        upstream = %config.reddit_api_url,
        sample_size = config.sample_size,
        fanout_concurrency = config.fanout_concurrency,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
