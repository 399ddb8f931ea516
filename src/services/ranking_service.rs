//! Author rankings

use sqlx::PgPool;

use crate::{
    db::repositories::SubmissionRepository,
    error::AppResult,
    models::{RankingEntry, RankingKind, UserCount},
};

/// Ranking service for aggregate author statistics
pub struct RankingService;

impl RankingService {
    /// The full ranking for a metric
    pub async fn ranking(pool: &PgPool, kind: RankingKind) -> AppResult<Vec<RankingEntry>> {
        let counts = SubmissionRepository::ranking_counts(pool, kind).await?;
        Ok(assign_ranks(counts))
    }

    /// One user's entry in a metric's ranking, if any
    pub async fn find_user(
        pool: &PgPool,
        kind: RankingKind,
        user: &str,
    ) -> AppResult<Option<RankingEntry>> {
        let ranking = Self::ranking(pool, kind).await?;
        Ok(ranking.into_iter().find(|entry| entry.user == user))
    }
}

/// Assign dense competition ranks to per-user counts.
///
/// Equal counts share a rank and the next distinct count is ranked one
/// higher, so there are no gaps. Ties order by user name.
pub fn assign_ranks(mut counts: Vec<UserCount>) -> Vec<RankingEntry> {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user_name.cmp(&b.user_name)));

    let mut entries = Vec::with_capacity(counts.len());
    let mut rank = 0;
    let mut previous: Option<i64> = None;

    for row in counts {
        if previous != Some(row.count) {
            rank += 1;
            previous = Some(row.count);
        }
        entries.push(RankingEntry {
            rank,
            user: row.user_name,
            count: row.count,
        });
    }
    entries
}
