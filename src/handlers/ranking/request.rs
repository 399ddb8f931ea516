//! Ranking request types

use serde::Deserialize;

/// Query parameters for the ranking endpoint
#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    /// Metric selector: ac (default), short, fast, or first
    pub kind: Option<String>,
}
