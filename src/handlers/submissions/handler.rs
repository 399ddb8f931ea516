//! Submission listing handler implementations

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    constants::SUBMISSION_LIST_LIMIT,
    db::repositories::SubmissionRepository,
    error::{AppError, AppResult},
    state::AppState,
    utils::validate_identifier,
};

use super::{request::ListSubmissionsQuery, response::SubmissionResponse};

/// Filtered submission list.
///
/// Never cached, always capped: the row limit bounds both response size and
/// store load.
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<Vec<SubmissionResponse>>> {
    let user = validated_filter(query.user.as_deref())?;
    let contest = validated_filter(query.contest.as_deref())?;
    let problem = validated_filter(query.problem.as_deref())?;
    let status = validated_filter(query.status.as_deref())?;

    let submissions = SubmissionRepository::list_filtered(
        state.db(),
        user,
        contest,
        problem,
        status,
        SUBMISSION_LIST_LIMIT,
    )
    .await?;

    Ok(Json(
        submissions.into_iter().map(SubmissionResponse::from).collect(),
    ))
}

/// Normalize an optional filter: absent or empty means "no filter",
/// anything else must be a valid identifier
fn validated_filter(value: Option<&str>) -> AppResult<Option<&str>> {
    match value {
        None => Ok(None),
        Some("") => Ok(None),
        Some(value) => {
            validate_identifier(value).map_err(|e| AppError::InvalidInput(e.to_string()))?;
            Ok(Some(value))
        }
    }
}
