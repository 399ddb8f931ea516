//! Submission model and verdict parsing

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Accepted status label as stored in the database
pub const ACCEPTED_LABEL: &str = "AC";

static JUDGING_PROGRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)/([0-9]+)$").expect("valid regex"));

/// Submission database model
///
/// Rows are immutable once inserted; the feed only ever shows a submission
/// with a terminal status before we store it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub problem_id: String,
    pub contest_id: String,
    pub user_name: String,
    pub language: String,
    pub source_length: i32,
    pub status: String,
    pub exec_time: i32,
    pub created_at: NaiveDateTime,
}

/// Submission as parsed from one feed row, before insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub id: i64,
    pub problem_id: String,
    pub contest_id: String,
    pub user_name: String,
    pub language: String,
    pub source_length: i32,
    pub status: String,
    pub exec_time: i32,
    pub created_at: NaiveDateTime,
}

/// Projection of an Accepted submission used by the derived-stats pass
#[derive(Debug, Clone, Copy, FromRow, PartialEq, Eq)]
pub struct AcceptedStat {
    pub id: i64,
    pub source_length: i32,
    pub exec_time: i32,
}

/// Submission verdict, parsed once from the feed's status label
///
/// Everything except `Waiting` and `Judging` is terminal; unknown labels are
/// carried through as `Other` and treated as terminal, since the feed only
/// marks in-flight judging with the two non-terminal shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    OutputLimitExceeded,
    RuntimeError,
    CompileError,
    InternalError,
    /// Explicit "awaiting judgement" marker
    Waiting,
    /// Partial progress, rendered as "done/total"
    Judging { done: u32, total: u32 },
    Other(String),
}

impl Verdict {
    /// Parse a raw status label from the submission feed
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if let Some(caps) = JUDGING_PROGRESS.captures(label) {
            let done = caps[1].parse().unwrap_or(0);
            let total = caps[2].parse().unwrap_or(0);
            return Self::Judging { done, total };
        }
        match label {
            "AC" => Self::Accepted,
            "WA" => Self::WrongAnswer,
            "TLE" => Self::TimeLimitExceeded,
            "MLE" => Self::MemoryLimitExceeded,
            "OLE" => Self::OutputLimitExceeded,
            "RE" => Self::RuntimeError,
            "CE" => Self::CompileError,
            "IE" => Self::InternalError,
            "WJ" => Self::Waiting,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether judging has finished for this verdict
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Waiting | Self::Judging { .. })
    }

    /// Whether the submission was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}
