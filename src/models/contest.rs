//! Contest model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Contest database model
///
/// Timestamps are judge-local wall-clock values scraped from the site, except
/// `last_crawled`, which uses the store's UTC clock.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: String,
    pub name: String,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub last_crawled: NaiveDateTime,
}

/// Contest row as assembled from the assignments page, before insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewContest {
    pub id: String,
    pub name: String,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
}
