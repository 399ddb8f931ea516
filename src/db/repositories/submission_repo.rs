//! Submission repository

use sqlx::{FromRow, PgPool};

use crate::{
    error::AppResult,
    models::{AcceptedStat, NewSubmission, RankingKind, Submission, UserCount},
    models::submission::ACCEPTED_LABEL,
};

/// (problem, status) pair of one submission by a given user
#[derive(Debug, Clone, FromRow)]
pub struct UserProblemStatus {
    pub problem_id: String,
    pub status: String,
}

/// (problem, user) pair of an Accepted submission by a rival
#[derive(Debug, Clone, FromRow)]
pub struct RivalAccepted {
    pub problem_id: String,
    pub user_name: String,
}

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Check whether a submission id is already stored
    pub async fn exists(pool: &PgPool, id: i64) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar(r#"SELECT 1 FROM submissions WHERE id = $1 LIMIT 1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(found.is_some())
    }

    /// Insert a batch of submissions, skipping ids already present
    ///
    /// Rows are immutable, so conflict-skip on the primary key makes the
    /// insert idempotent even when the existence check raced a previous run.
    pub async fn insert_many(pool: &PgPool, rows: &[NewSubmission]) -> AppResult<()> {
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO submissions
                    (id, problem_id, contest_id, user_name, language,
                     source_length, status, exec_time, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(row.id)
            .bind(&row.problem_id)
            .bind(&row.contest_id)
            .bind(&row.user_name)
            .bind(&row.language)
            .bind(row.source_length)
            .bind(&row.status)
            .bind(row.exec_time)
            .bind(row.created_at)
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    /// Number of stored submissions for a contest
    pub async fn count_for_contest(pool: &PgPool, contest_id: &str) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(id) FROM submissions WHERE contest_id = $1"#)
                .bind(contest_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Accepted submissions of a problem, projected for pointer recompute
    pub async fn accepted_stats(pool: &PgPool, problem_id: &str) -> AppResult<Vec<AcceptedStat>> {
        let stats = sqlx::query_as::<_, AcceptedStat>(
            r#"
            SELECT id, source_length, exec_time
            FROM submissions
            WHERE problem_id = $1 AND status = $2
            "#,
        )
        .bind(problem_id)
        .bind(ACCEPTED_LABEL)
        .fetch_all(pool)
        .await?;

        Ok(stats)
    }

    /// Filtered submission list, capped by the caller
    pub async fn list_filtered(
        pool: &PgPool,
        user: Option<&str>,
        contest: Option<&str>,
        problem: Option<&str>,
        status: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, problem_id, contest_id, user_name, language,
                   source_length, status, exec_time, created_at
            FROM submissions
            WHERE ($1::text IS NULL OR user_name = $1)
              AND ($2::text IS NULL OR contest_id = $2)
              AND ($3::text IS NULL OR problem_id = $3)
              AND ($4::text IS NULL OR status = $4)
            ORDER BY id DESC
            LIMIT $5
            "#,
        )
        .bind(user)
        .bind(contest)
        .bind(problem)
        .bind(status)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(submissions)
    }

    /// Aggregate per-user counts for a ranking metric, largest first
    ///
    /// Equal counts order by user name, which fixes the tie order of the
    /// ranking downstream.
    pub async fn ranking_counts(pool: &PgPool, kind: RankingKind) -> AppResult<Vec<UserCount>> {
        if kind == RankingKind::Accepted {
            let counts = sqlx::query_as::<_, UserCount>(
                r#"
                SELECT user_name, COUNT(DISTINCT problem_id) AS count
                FROM submissions
                WHERE status = $1
                GROUP BY user_name
                ORDER BY count DESC, user_name
                "#,
            )
            .bind(ACCEPTED_LABEL)
            .fetch_all(pool)
            .await?;

            return Ok(counts);
        }

        let query = match kind {
            RankingKind::Shortest => {
                r#"
                SELECT s.user_name, COUNT(s.id) AS count
                FROM problems AS p
                JOIN submissions AS s ON s.id = p.shortest_submission_id
                GROUP BY s.user_name
                ORDER BY count DESC, s.user_name
                "#
            }
            RankingKind::Fastest => {
                r#"
                SELECT s.user_name, COUNT(s.id) AS count
                FROM problems AS p
                JOIN submissions AS s ON s.id = p.fastest_submission_id
                GROUP BY s.user_name
                ORDER BY count DESC, s.user_name
                "#
            }
            _ => {
                r#"
                SELECT s.user_name, COUNT(s.id) AS count
                FROM problems AS p
                JOIN submissions AS s ON s.id = p.first_submission_id
                GROUP BY s.user_name
                ORDER BY count DESC, s.user_name
                "#
            }
        };

        let counts = sqlx::query_as::<_, UserCount>(query)
            .fetch_all(pool)
            .await?;

        Ok(counts)
    }

    /// Every (problem, status) a user has submitted against
    pub async fn statuses_for_user(
        pool: &PgPool,
        user: &str,
    ) -> AppResult<Vec<UserProblemStatus>> {
        let rows = sqlx::query_as::<_, UserProblemStatus>(
            r#"SELECT problem_id, status FROM submissions WHERE user_name = $1"#,
        )
        .bind(user)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Accepted (problem, user) pairs for a rival set
    pub async fn accepted_for_users(
        pool: &PgPool,
        users: &[String],
    ) -> AppResult<Vec<RivalAccepted>> {
        let rows = sqlx::query_as::<_, RivalAccepted>(
            r#"
            SELECT DISTINCT problem_id, user_name
            FROM submissions
            WHERE user_name = ANY($1) AND status = $2
            "#,
        )
        .bind(users)
        .bind(ACCEPTED_LABEL)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
