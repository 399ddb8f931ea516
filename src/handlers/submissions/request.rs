//! Submission listing request types

use serde::Deserialize;

/// Query parameters for the submissions endpoint; every filter is optional
#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    pub user: Option<String>,
    pub contest: Option<String>,
    pub problem: Option<String>,
    pub status: Option<String>,
}
