//! Judge-site fetching and HTML parsing
//!
//! This module owns the HTTP client and the page parsers for the three page
//! shapes the crawler consumes: the root contest listing, a contest's
//! assignments page, and the paginated submission feed. The `ContestSite`
//! trait is the seam the ingestion services are written against.

pub mod assignments;
pub mod catalog;
pub mod client;
pub mod feed;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::AppResult;
use crate::models::Verdict;

pub use client::HttpSite;

/// Problem link scraped from an assignments page
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentProblem {
    pub id: String,
    pub name: String,
}

/// Everything extracted from one assignments page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContestAssignments {
    pub name: String,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub problems: Vec<AssignmentProblem>,
}

/// One row of the submission feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRow {
    pub id: i64,
    pub problem_id: String,
    pub user_name: String,
    pub language: String,
    pub source_length: i32,
    /// Raw status label as rendered by the site
    pub status_label: String,
    /// The label parsed once at this boundary
    pub verdict: Verdict,
    pub exec_time: i32,
    pub created_at: NaiveDateTime,
}

/// One fetched page of the submission feed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedPage {
    pub rows: Vec<FeedRow>,
    /// Largest page index referenced by this page's pagination links
    pub last_linked_page: u32,
}

/// The judge site as seen by the crawler
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestSite: Send + Sync {
    /// Contest slugs currently linked from the root listing
    async fn contest_ids(&self) -> AppResult<Vec<String>>;

    /// Metadata and problem list of one contest
    async fn assignments(&self, contest_id: &str) -> AppResult<ContestAssignments>;

    /// One page of a contest's submission feed, newest first
    async fn submission_page(
        &self,
        contest_id: &str,
        page: u32,
        accepted_only: bool,
    ) -> AppResult<FeedPage>;
}
