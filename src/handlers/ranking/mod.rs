//! Ranking handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Ranking routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(handler::get_ranking))
}
