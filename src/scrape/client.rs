//! HTTP-backed judge-site client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{ContestAssignments, ContestSite, FeedPage, assignments, catalog, feed};
use crate::config::SiteConfig;
use crate::error::{AppError, AppResult};

/// `ContestSite` implementation fetching real pages over HTTPS
pub struct HttpSite {
    client: Client,
    base_host: String,
}

impl HttpSite {
    /// Build a client with the configured user agent and request timeout.
    ///
    /// The timeout is the only cancellation mechanism the crawler has; a
    /// stalled fetch blocks its tick until it fires.
    pub fn new(config: &SiteConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_host: config.base_host.clone(),
        })
    }

    async fn fetch_text(&self, url: &str) -> AppResult<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ContestSite for HttpSite {
    async fn contest_ids(&self) -> AppResult<Vec<String>> {
        let url = format!("https://{}/", self.base_host);
        let text = self.fetch_text(&url).await?;
        // Parse in a block so the non-Send DOM never lives across an await.
        let ids = {
            let document = Html::parse_document(&text);
            catalog::parse_contest_ids(&document, &self.base_host)
        };
        Ok(ids)
    }

    async fn assignments(&self, contest_id: &str) -> AppResult<ContestAssignments> {
        let url = format!("https://{}.{}/assignments", contest_id, self.base_host);
        let text = self.fetch_text(&url).await?;
        let parsed = {
            let document = Html::parse_document(&text);
            assignments::parse_assignments(&document)
        };
        Ok(parsed)
    }

    async fn submission_page(
        &self,
        contest_id: &str,
        page: u32,
        accepted_only: bool,
    ) -> AppResult<FeedPage> {
        let suffix = if accepted_only { "?status=AC" } else { "" };
        let url = format!(
            "https://{}.{}/submissions/all/{}{}",
            contest_id, self.base_host, page, suffix
        );
        let text = self.fetch_text(&url).await?;
        let parsed = {
            let document = Html::parse_document(&text);
            feed::parse_feed_page(&document)
        };
        Ok(parsed)
    }
}
