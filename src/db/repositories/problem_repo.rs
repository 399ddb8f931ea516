//! Problem repository

use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use crate::{
    error::AppResult,
    models::{NewProblem, ProblemPointers},
    models::submission::ACCEPTED_LABEL,
};

/// Problem row joined with the user names behind its optimum pointers
#[derive(Debug, Clone, FromRow)]
pub struct ProblemSummaryRow {
    pub id: String,
    pub contest_id: String,
    pub name: String,
    pub difficulty: Option<f64>,
    pub shortest_submission_id: Option<i64>,
    pub fastest_submission_id: Option<i64>,
    pub first_submission_id: Option<i64>,
    pub shortest_user: Option<String>,
    pub fastest_user: Option<String>,
    pub first_user: Option<String>,
}

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Check whether a problem is already stored
    pub async fn exists(pool: &PgPool, id: &str) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar(r#"SELECT 1 FROM problems WHERE id = $1 LIMIT 1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(found.is_some())
    }

    /// Insert a problem if its id is not yet present
    pub async fn insert(pool: &PgPool, problem: &NewProblem) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO problems (id, contest_id, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&problem.id)
        .bind(&problem.contest_id)
        .bind(&problem.name)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Problems needing a derived-stats recompute: those with a recent
    /// Accepted submission, plus those never computed at all
    pub async fn dirty_ids(pool: &PgPool, threshold: NaiveDateTime) -> AppResult<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT problem_id FROM submissions
            WHERE status = $1 AND created_at > $2
            UNION
            SELECT id FROM problems WHERE first_submission_id IS NULL
            "#,
        )
        .bind(ACCEPTED_LABEL)
        .bind(threshold)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    /// Write all three optimum pointers of a problem in one statement
    pub async fn set_pointers(
        pool: &PgPool,
        id: &str,
        pointers: ProblemPointers,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE problems
            SET shortest_submission_id = $2,
                fastest_submission_id = $3,
                first_submission_id = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(pointers.shortest)
        .bind(pointers.fastest)
        .bind(pointers.first)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// All problems with the authors of their optimum submissions
    pub async fn list_with_authors(pool: &PgPool) -> AppResult<Vec<ProblemSummaryRow>> {
        let rows = sqlx::query_as::<_, ProblemSummaryRow>(
            r#"
            SELECT p.id, p.contest_id, p.name, p.difficulty,
                   p.shortest_submission_id, p.fastest_submission_id, p.first_submission_id,
                   sh.user_name AS shortest_user,
                   fs.user_name AS fastest_user,
                   fa.user_name AS first_user
            FROM problems AS p
            LEFT JOIN submissions AS sh ON sh.id = p.shortest_submission_id
            LEFT JOIN submissions AS fs ON fs.id = p.fastest_submission_id
            LEFT JOIN submissions AS fa ON fa.id = p.first_submission_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
