//! Submission listing response types

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::Submission;

/// One submission as served by the submissions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub problem: String,
    pub contest: String,
    pub user: String,
    pub status: String,
    pub source_length: i32,
    pub lang: String,
    pub exec_time: i32,
    pub date: NaiveDateTime,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            problem: submission.problem_id,
            contest: submission.contest_id,
            user: submission.user_name,
            status: submission.status,
            source_length: submission.source_length,
            lang: submission.language,
            exec_time: submission.exec_time,
            date: submission.created_at,
        }
    }
}
