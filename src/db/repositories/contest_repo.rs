//! Contest repository

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Contest, NewContest},
};

/// Repository for contest database operations
pub struct ContestRepository;

impl ContestRepository {
    /// Check whether a contest is already onboarded
    pub async fn exists(pool: &PgPool, id: &str) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar(r#"SELECT 1 FROM contests WHERE id = $1 LIMIT 1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(found.is_some())
    }

    /// Insert a contest if its id is not yet present
    pub async fn insert(pool: &PgPool, contest: &NewContest) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contests (id, name, start_at, end_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&contest.id)
        .bind(&contest.name)
        .bind(contest.start_at)
        .bind(contest.end_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// The contest least recently refreshed, ties broken by id
    pub async fn oldest_crawled(pool: &PgPool) -> AppResult<Option<String>> {
        let id: Option<String> = sqlx::query_scalar(
            r#"SELECT id FROM contests ORDER BY last_crawled, id LIMIT 1"#,
        )
        .fetch_optional(pool)
        .await?;

        Ok(id)
    }

    /// Record a completed submission refresh
    pub async fn touch_last_crawled(
        pool: &PgPool,
        id: &str,
        at: NaiveDateTime,
    ) -> AppResult<()> {
        sqlx::query(r#"UPDATE contests SET last_crawled = $2 WHERE id = $1"#)
            .bind(id)
            .bind(at)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// All contests, newest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT id, name, start_at, end_at, last_crawled
            FROM contests
            ORDER BY start_at DESC NULLS LAST, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }
}
