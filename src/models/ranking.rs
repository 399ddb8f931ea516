//! Ranking models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metric a ranking is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankingKind {
    /// Distinct problems solved
    Accepted,
    /// Problems whose shortest-submission pointer belongs to the user
    Shortest,
    /// Problems whose fastest-submission pointer belongs to the user
    Fastest,
    /// Problems whose first-submission pointer belongs to the user
    FirstAccepted,
}

impl RankingKind {
    /// Parse the `kind` query parameter; an empty value selects the
    /// solved-count ranking
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "" | "ac" => Some(Self::Accepted),
            "short" => Some(Self::Shortest),
            "fast" => Some(Self::Fastest),
            "first" => Some(Self::FirstAccepted),
            _ => None,
        }
    }

    /// The parameter spelling for this kind
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Accepted => "ac",
            Self::Shortest => "short",
            Self::Fastest => "fast",
            Self::FirstAccepted => "first",
        }
    }
}

/// One user's aggregate count for a metric, as read from the store
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct UserCount {
    pub user_name: String,
    pub count: i64,
}

/// One ranking row served by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankingEntry {
    pub rank: i64,
    pub user: String,
    pub count: i64,
}
