//! Contest listing response types

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::Contest;

/// One contest as served by the contests endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ContestResponse {
    pub id: String,
    pub name: String,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
}

impl From<Contest> for ContestResponse {
    fn from(contest: Contest) -> Self {
        Self {
            id: contest.id,
            name: contest.name,
            start_at: contest.start_at,
            end_at: contest.end_at,
        }
    }
}
