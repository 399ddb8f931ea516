//! solvetrack - Judge-site ingestion and statistics backend
//!
//! This library crawls contests, problems, and submissions from an external
//! competitive-programming site into Postgres, maintains derived per-problem
//! "best submission" pointers, and serves rankings and profiles over a small
//! read-only API.
//!
//! # Architecture
//!
//! Two independently deployable binaries share this library and the backing
//! store:
//! - **Crawler**: a single-owner polling loop (discover contests, paginate
//!   submission feeds, recompute derived pointers)
//! - **API server**: read-only axum handlers behind a TTL query cache
//!
//! The layering follows handlers → services → repositories → models, with
//! the judge site and the store behind trait seams for testing.

pub mod cache;
pub mod config;
pub mod constants;
pub mod crawler;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod scrape;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
