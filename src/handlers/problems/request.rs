//! Problem listing request types

use serde::Deserialize;

/// Query parameters for the problems endpoint
#[derive(Debug, Deserialize)]
pub struct ListProblemsQuery {
    /// User whose status to overlay
    pub user: Option<String>,
    /// Comma-joined rival user list
    pub rivals: Option<String>,
}
