//! User profile response types

use serde::Serialize;

/// Rank and count across every metric for one user
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProfile {
    pub user: String,
    pub ac_rank: i64,
    pub ac_count: i64,
    pub short_rank: i64,
    pub short_count: i64,
    pub fast_rank: i64,
    pub fast_count: i64,
    pub first_rank: i64,
    pub first_count: i64,
}
