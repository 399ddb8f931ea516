//! User profile handler implementations

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::{
    cache::CacheKey,
    error::{AppError, AppResult},
    services::UserService,
    state::AppState,
    utils::validate_identifier,
};

use super::request::UserQuery;

/// Profile of one user: rank and count for every metric
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Value>> {
    validate_identifier(&query.user).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let user = query.user;
    let key = CacheKey::new("user").user(&user);
    let db = state.db().clone();
    let value = state
        .cache()
        .get_or_compute(key, || async move {
            let profile = UserService::profile(&db, &user)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No accepted submissions: {user}")))?;
            serde_json::to_value(profile).map_err(|e| AppError::Internal(e.into()))
        })
        .await?;

    Ok(Json(value))
}
