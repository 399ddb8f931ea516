//! Store seam consumed by the crawler
//!
//! The ingestion pipeline only ever needs idempotent inserts, a handful of
//! filtered selects, and keyed updates; this trait pins that surface so the
//! pipeline can run against an in-memory store in tests.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::{
    db::repositories::{ContestRepository, ProblemRepository, SubmissionRepository},
    error::AppResult,
    models::{AcceptedStat, NewContest, NewProblem, NewSubmission, ProblemPointers},
};

/// Store operations required by ingestion and derived-stats maintenance
#[async_trait]
pub trait Store: Send + Sync {
    async fn contest_exists(&self, id: &str) -> AppResult<bool>;
    async fn insert_contest(&self, contest: &NewContest) -> AppResult<()>;
    async fn problem_exists(&self, id: &str) -> AppResult<bool>;
    async fn insert_problem(&self, problem: &NewProblem) -> AppResult<()>;
    async fn oldest_crawled_contest(&self) -> AppResult<Option<String>>;
    async fn touch_last_crawled(&self, id: &str, at: NaiveDateTime) -> AppResult<()>;
    async fn submission_exists(&self, id: i64) -> AppResult<bool>;
    async fn insert_submissions(&self, rows: &[NewSubmission]) -> AppResult<()>;
    async fn contest_submission_count(&self, contest_id: &str) -> AppResult<i64>;
    async fn dirty_problem_ids(&self, threshold: NaiveDateTime) -> AppResult<Vec<String>>;
    async fn accepted_stats(&self, problem_id: &str) -> AppResult<Vec<AcceptedStat>>;
    async fn set_problem_pointers(
        &self,
        problem_id: &str,
        pointers: ProblemPointers,
    ) -> AppResult<()>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn contest_exists(&self, id: &str) -> AppResult<bool> {
        ContestRepository::exists(&self.pool, id).await
    }

    async fn insert_contest(&self, contest: &NewContest) -> AppResult<()> {
        ContestRepository::insert(&self.pool, contest).await
    }

    async fn problem_exists(&self, id: &str) -> AppResult<bool> {
        ProblemRepository::exists(&self.pool, id).await
    }

    async fn insert_problem(&self, problem: &NewProblem) -> AppResult<()> {
        ProblemRepository::insert(&self.pool, problem).await
    }

    async fn oldest_crawled_contest(&self) -> AppResult<Option<String>> {
        ContestRepository::oldest_crawled(&self.pool).await
    }

    async fn touch_last_crawled(&self, id: &str, at: NaiveDateTime) -> AppResult<()> {
        ContestRepository::touch_last_crawled(&self.pool, id, at).await
    }

    async fn submission_exists(&self, id: i64) -> AppResult<bool> {
        SubmissionRepository::exists(&self.pool, id).await
    }

    async fn insert_submissions(&self, rows: &[NewSubmission]) -> AppResult<()> {
        SubmissionRepository::insert_many(&self.pool, rows).await
    }

    async fn contest_submission_count(&self, contest_id: &str) -> AppResult<i64> {
        SubmissionRepository::count_for_contest(&self.pool, contest_id).await
    }

    async fn dirty_problem_ids(&self, threshold: NaiveDateTime) -> AppResult<Vec<String>> {
        ProblemRepository::dirty_ids(&self.pool, threshold).await
    }

    async fn accepted_stats(&self, problem_id: &str) -> AppResult<Vec<AcceptedStat>> {
        SubmissionRepository::accepted_stats(&self.pool, problem_id).await
    }

    async fn set_problem_pointers(
        &self,
        problem_id: &str,
        pointers: ProblemPointers,
    ) -> AppResult<()> {
        ProblemRepository::set_pointers(&self.pool, problem_id, pointers).await
    }
}
