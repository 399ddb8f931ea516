//! Per-user profile

use sqlx::PgPool;

use crate::{
    error::AppResult, handlers::users::response::UserProfile, models::RankingKind,
    services::RankingService,
};

/// User service for the query API
pub struct UserService;

impl UserService {
    /// Assemble a user's profile from the four rankings; a user with no
    /// accepted submissions has no profile
    pub async fn profile(pool: &PgPool, user: &str) -> AppResult<Option<UserProfile>> {
        let Some(ac) = RankingService::find_user(pool, RankingKind::Accepted, user).await? else {
            return Ok(None);
        };

        let mut profile = UserProfile {
            user: user.to_string(),
            ac_rank: ac.rank,
            ac_count: ac.count,
            ..UserProfile::default()
        };

        if let Some(entry) = RankingService::find_user(pool, RankingKind::Shortest, user).await? {
            profile.short_rank = entry.rank;
            profile.short_count = entry.count;
        }
        if let Some(entry) = RankingService::find_user(pool, RankingKind::Fastest, user).await? {
            profile.fast_rank = entry.rank;
            profile.fast_count = entry.count;
        }
        if let Some(entry) =
            RankingService::find_user(pool, RankingKind::FirstAccepted, user).await?
        {
            profile.first_rank = entry.rank;
            profile.first_count = entry.count;
        }

        Ok(Some(profile))
    }
}
