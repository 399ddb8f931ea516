//! solvetrack - Crawler entry point
//!
//! Runs the polling loop that keeps the store in sync with the judge site.
//! Deployable independently of the API server; the two share only the
//! database.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solvetrack::{
    config::CONFIG,
    crawler::CrawlScheduler,
    db::{self, PgStore},
    scrape::HttpSite,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting solvetrack crawler...");

    // The backing store is mandatory; refuse to start without it.
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    let site = Arc::new(HttpSite::new(&CONFIG.site)?);
    let store = Arc::new(PgStore::new(db_pool));

    CrawlScheduler::new(site, store, &CONFIG.crawler).run().await;

    Ok(())
}
