//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// JUDGE SITE
// =============================================================================

/// Rows per submission-feed page as rendered by the judge site
pub const FEED_PAGE_SIZE: u32 = 20;

/// Default HTTP timeout for judge-site fetches, in seconds
pub const DEFAULT_SITE_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent sent to the judge site
pub const DEFAULT_USER_AGENT: &str = concat!("solvetrack/", env!("CARGO_PKG_VERSION"));

/// The judge's wall clock runs ahead of the store's UTC clock by this many
/// hours; every comparison of scraped timestamps against store time must
/// account for it.
pub const JUDGE_CLOCK_OFFSET_HOURS: i64 = 9;

// =============================================================================
// CRAWLER DEFAULTS
// =============================================================================

/// Default sleep between scheduler ticks, in seconds
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 1;

/// Default ticks per scheduler cycle; tick 0 of each cycle runs the
/// problem-set sweep
pub const DEFAULT_CYCLE_TICKS: u64 = 1800;

/// Trailing window of Accepted submissions that marks a problem dirty for
/// the derived-stats pass, in minutes
pub const DIRTY_WINDOW_MINUTES: i64 = 5;

// =============================================================================
// QUERY API
// =============================================================================

/// Default TTL for cached aggregate query results, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 180;

/// Hard cap on rows returned by the submission-list endpoint
pub const SUBMISSION_LIST_LIMIT: i64 = 1000;

/// Row cap applied to ranking responses
pub const RANKING_LIMIT: i64 = 1000;
