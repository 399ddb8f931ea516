//! Problem listing response types

use serde::Serialize;

/// One problem as served by the problems endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ProblemStatusEntry {
    pub id: String,
    pub contest: String,
    pub name: String,
    pub difficulty: Option<f64>,
    /// Authors of the optimum submissions
    pub shortest: Option<String>,
    pub fastest: Option<String>,
    pub first: Option<String>,
    /// The querying user's best status against this problem, "" if none
    pub status: String,
    /// Rivals who solved this problem
    pub rivals: Vec<String>,
}
