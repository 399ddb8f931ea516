//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain. The
//! whole surface is read-only; aggregate endpoints go through the query
//! cache, the submission list deliberately does not.

pub mod contests;
pub mod health;
pub mod problems;
pub mod ranking;
pub mod submissions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/problems", problems::routes())
        .nest("/contests", contests::routes())
        .nest("/ranking", ranking::routes())
        .nest("/user", users::routes())
        .nest("/submissions", submissions::routes())
}
