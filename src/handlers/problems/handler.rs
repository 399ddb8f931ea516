//! Problem listing handler implementations

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::{
    cache::CacheKey,
    error::{AppError, AppResult},
    services::ProblemService,
    state::AppState,
    utils::{parse_rival_list, validate_identifier},
};

use super::request::ListProblemsQuery;

/// List all problems with the caller's status and rival accepts overlaid
pub async fn list_problems(
    State(state): State<AppState>,
    Query(query): Query<ListProblemsQuery>,
) -> AppResult<Json<Value>> {
    let user = match query.user.as_deref() {
        Some(user) if !user.is_empty() => {
            validate_identifier(user).map_err(|e| AppError::InvalidInput(e.to_string()))?;
            user.to_string()
        }
        _ => String::new(),
    };

    let rivals = match query.rivals.as_deref() {
        Some(rivals) => {
            parse_rival_list(rivals).map_err(|e| AppError::InvalidInput(e.to_string()))?
        }
        None => Vec::new(),
    };

    let key = CacheKey::new("problems").user(&user).rivals(&rivals);
    let db = state.db().clone();
    let value = state
        .cache()
        .get_or_compute(key, || async move {
            let entries = ProblemService::list_with_status(&db, &user, &rivals).await?;
            serde_json::to_value(entries).map_err(|e| AppError::Internal(e.into()))
        })
        .await?;

    Ok(Json(value))
}
