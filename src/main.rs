use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use tldr_worker::application::services::RedirectService;
use tldr_worker::config::Config;
use tldr_worker::infrastructure::bus::{MessageBus, RedisBus, ScopedBus};
use tldr_worker::infrastructure::fetch::HttpRedirectFetcher;
use tldr_worker::infrastructure::persistence::PgContentRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    let pool = Arc::new(pool);

    let bus: Arc<dyn MessageBus> = Arc::new(RedisBus::connect(&config.redis_url).await?);
    let scoped = ScopedBus::new(bus, config.bus_scope.clone());

    let fetcher = HttpRedirectFetcher::new(Duration::from_secs(config.fetch_timeout_seconds))?;

    let reconciler = Arc::new(RedirectService::new(
        Arc::new(PgContentRepository::new(pool.clone())),
        Arc::new(fetcher),
    ));
    reconciler.subscribe(&scoped).await?;

    tracing::info!(
        "tldr-worker listening for content events (scope {})",
        config.bus_scope
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    Ok(())
}
