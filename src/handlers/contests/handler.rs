//! Contest listing handler implementations

use axum::{Json, extract::State};
use serde_json::Value;

use crate::{
    cache::CacheKey,
    db::repositories::ContestRepository,
    error::{AppError, AppResult},
    state::AppState,
};

use super::response::ContestResponse;

/// List all known contests
pub async fn list_contests(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let db = state.db().clone();
    let value = state
        .cache()
        .get_or_compute(CacheKey::new("contests"), || async move {
            let contests: Vec<ContestResponse> = ContestRepository::list(&db)
                .await?
                .into_iter()
                .map(ContestResponse::from)
                .collect();
            serde_json::to_value(contests).map_err(|e| AppError::Internal(e.into()))
        })
        .await?;

    Ok(Json(value))
}
