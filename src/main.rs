use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use panorama::api::create_router;
use panorama::client::SearchClient;
use panorama::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .init();

    let config = Config::from_env()?;
    let client = Arc::new(SearchClient::from_config(&config)?);

    // expired entries are dropped once per TTL window
    let sweeper = client.clone();
    let period = config.cache_ttl.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            let purged = sweeper.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "purged expired cache entries");
            }
        }
    });

    let app = create_router(client, &config.static_dir);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        upstream = %config.upstream_url,
        "dashboard listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
