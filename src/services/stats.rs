//! Derived per-problem statistics
//!
//! Recomputes the shortest/fastest/first submission pointers for problems
//! touched by recent Accepted submissions, and for problems never computed
//! at all.

use chrono::NaiveDateTime;

use crate::{
    db::Store,
    error::AppResult,
    models::{AcceptedStat, ProblemPointers},
    utils::judge_dirty_threshold,
};

/// Recomputes derived submission pointers for dirty problems
pub struct StatsMaintainer<'a> {
    store: &'a dyn Store,
}

impl<'a> StatsMaintainer<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Recompute pointers for every dirty problem; returns how many were
    /// processed
    pub async fn refresh_dirty(&self, store_now: NaiveDateTime) -> AppResult<usize> {
        let threshold = judge_dirty_threshold(store_now);
        let dirty = self.store.dirty_problem_ids(threshold).await?;

        for problem_id in &dirty {
            let stats = self.store.accepted_stats(problem_id).await?;
            let pointers = compute_pointers(&stats);
            self.store
                .set_problem_pointers(problem_id, pointers)
                .await?;
        }

        if !dirty.is_empty() {
            tracing::debug!(problems = dirty.len(), "Refreshed derived pointers");
        }
        Ok(dirty.len())
    }
}

/// The optimum pointers over a problem's Accepted submissions.
///
/// Ties break on the lower submission id; ids grow monotonically with
/// submission time, so minimum id is also the earliest accept.
pub fn compute_pointers(stats: &[AcceptedStat]) -> ProblemPointers {
    ProblemPointers {
        shortest: stats
            .iter()
            .min_by_key(|s| (s.source_length, s.id))
            .map(|s| s.id),
        fastest: stats.iter().min_by_key(|s| (s.exec_time, s.id)).map(|s| s.id),
        first: stats.iter().map(|s| s.id).min(),
    }
}
