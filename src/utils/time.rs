//! Time utilities

use chrono::{Duration, NaiveDateTime, Utc};

use crate::constants::{DIRTY_WINDOW_MINUTES, JUDGE_CLOCK_OFFSET_HOURS};

/// Current store-clock time (UTC, naive)
pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Threshold for the derived-stats dirty window.
///
/// Scraped `created_at` values carry the judge's wall clock, which runs ahead
/// of the store clock by a fixed offset; a submission is "recent" when its
/// judge-local timestamp exceeds this value.
pub fn judge_dirty_threshold(store_now: NaiveDateTime) -> NaiveDateTime {
    store_now - Duration::hours(JUDGE_CLOCK_OFFSET_HOURS) - Duration::minutes(DIRTY_WINDOW_MINUTES)
}

/// Parse a judge-local timestamp as rendered in the submission feed
pub fn parse_judge_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y/%m/%d %H:%M:%S"))
        .ok()
}
