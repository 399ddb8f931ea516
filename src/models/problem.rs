//! Problem model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Problem database model
///
/// The three submission pointers reference the Accepted submission achieving
/// the respective optimum; NULL means "not yet computed".
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub contest_id: String,
    pub name: String,
    pub shortest_submission_id: Option<i64>,
    pub fastest_submission_id: Option<i64>,
    pub first_submission_id: Option<i64>,
    pub difficulty: Option<f64>,
}

/// Problem row as scraped from the assignments page, before insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewProblem {
    pub id: String,
    pub contest_id: String,
    pub name: String,
}

/// The recomputed optimum pointers for one problem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemPointers {
    pub shortest: Option<i64>,
    pub fastest: Option<i64>,
    pub first: Option<i64>,
}
