//! Ranking handler implementations

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::{
    cache::CacheKey,
    constants::RANKING_LIMIT,
    error::{AppError, AppResult},
    models::RankingKind,
    services::RankingService,
    state::AppState,
};

use super::request::RankingQuery;

/// Ranking for one metric, dense-ranked
pub async fn get_ranking(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> AppResult<Json<Value>> {
    let param = query.kind.unwrap_or_default();
    let kind = RankingKind::from_param(&param)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown ranking kind: {param}")))?;

    let db = state.db().clone();
    let value = state
        .cache()
        .get_or_compute(CacheKey::new("ranking").kind(kind), || async move {
            let mut ranking = RankingService::ranking(&db, kind).await?;
            // The full ranking still backs profile lookups; only the response
            // is capped.
            ranking.truncate(RANKING_LIMIT as usize);
            serde_json::to_value(ranking).map_err(|e| AppError::Internal(e.into()))
        })
        .await?;

    Ok(Json(value))
}
