//! Crawl scheduler
//!
//! Drives ingestion on a fixed polling cycle, strictly one operation at a
//! time. Tick 0 of each cycle sweeps the contest catalog for new problem
//! sets; every other tick refreshes the submission feed of the contest that
//! has waited longest, then lets the stats maintainer catch up on dirty
//! problems. A failing tick is logged and the loop moves on.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::CrawlerConfig,
    db::Store,
    error::AppResult,
    scrape::ContestSite,
    services::{ProblemSetIngester, StatsMaintainer, SubmissionIngester},
    utils::now_utc,
};

/// Scheduler that owns the polling loop
pub struct CrawlScheduler {
    site: Arc<dyn ContestSite>,
    store: Arc<dyn Store>,
    tick_interval: Duration,
    cycle_ticks: u64,
}

impl CrawlScheduler {
    pub fn new(site: Arc<dyn ContestSite>, store: Arc<dyn Store>, config: &CrawlerConfig) -> Self {
        Self {
            site,
            store,
            tick_interval: Duration::from_secs(config.tick_interval_secs),
            cycle_ticks: config.cycle_ticks.max(1),
        }
    }

    /// Run the polling loop forever
    pub async fn run(&self) {
        tracing::info!(
            cycle_ticks = self.cycle_ticks,
            interval_secs = self.tick_interval.as_secs(),
            "Crawl scheduler started"
        );

        let mut tick = 0u64;
        loop {
            if let Err(e) = self.tick(tick).await {
                tracing::warn!(tick, "Tick failed: {}", e);
            }
            tick = (tick + 1) % self.cycle_ticks;
            tokio::time::sleep(self.tick_interval).await;
        }
    }

    /// Execute one tick of the cycle
    pub async fn tick(&self, index: u64) -> AppResult<()> {
        if index % self.cycle_ticks == 0 {
            self.problem_sweep().await
        } else {
            self.submission_tick().await
        }
    }

    async fn problem_sweep(&self) -> AppResult<()> {
        let ingester = ProblemSetIngester::new(self.site.as_ref(), self.store.as_ref());
        let outcome = ingester.sweep().await?;
        tracing::info!(
            discovered = outcome.discovered,
            onboarded = outcome.onboarded,
            skipped = outcome.skipped_empty,
            failures = outcome.failures,
            "Problem-set sweep finished"
        );
        Ok(())
    }

    async fn submission_tick(&self) -> AppResult<()> {
        if let Some(contest_id) = self.store.oldest_crawled_contest().await? {
            let ingester = SubmissionIngester::new(self.site.as_ref(), self.store.as_ref());
            let outcome = ingester.refresh(&contest_id).await?;
            tracing::info!(
                contest = %contest_id,
                pages = outcome.pages_visited,
                inserted = outcome.inserted,
                discarded = outcome.discarded_pages,
                backfilled = outcome.backfilled,
                "Submission refresh finished"
            );
        }

        StatsMaintainer::new(self.store.as_ref())
            .refresh_dirty(now_utc())
            .await?;
        Ok(())
    }
}
