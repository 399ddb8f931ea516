//! Contest and problem-set onboarding

use crate::{
    db::Store,
    error::AppResult,
    models::{NewContest, NewProblem},
    scrape::ContestSite,
    services::ContestCatalog,
};

/// Summary of one onboarding sweep
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    pub discovered: usize,
    pub onboarded: usize,
    pub skipped_empty: usize,
    pub failures: usize,
}

/// Onboards newly discovered contests together with their problem sets
pub struct ProblemSetIngester<'a> {
    site: &'a dyn ContestSite,
    store: &'a dyn Store,
}

impl<'a> ProblemSetIngester<'a> {
    pub fn new(site: &'a dyn ContestSite, store: &'a dyn Store) -> Self {
        Self { site, store }
    }

    /// Onboard every discovered contest that is not yet in the store.
    ///
    /// A contest row is only written together with a non-empty problem set;
    /// a contest whose assignments page yields no tasks stays unknown and is
    /// retried on a later cycle. One contest failing never aborts the sweep.
    pub async fn sweep(&self) -> AppResult<SweepOutcome> {
        let ids = ContestCatalog::new(self.site).discover().await;
        let mut outcome = SweepOutcome {
            discovered: ids.len(),
            ..SweepOutcome::default()
        };

        for id in ids {
            if self.store.contest_exists(&id).await? {
                continue;
            }
            match self.onboard(&id).await {
                Ok(true) => outcome.onboarded += 1,
                Ok(false) => {
                    outcome.skipped_empty += 1;
                    tracing::debug!(contest = %id, "Assignments page has no tasks yet, skipping");
                }
                Err(e) => {
                    outcome.failures += 1;
                    tracing::warn!(contest = %id, "Failed to onboard contest: {}", e);
                }
            }
        }

        Ok(outcome)
    }

    async fn onboard(&self, contest_id: &str) -> AppResult<bool> {
        let assignments = self.site.assignments(contest_id).await?;
        if assignments.problems.is_empty() {
            return Ok(false);
        }

        tracing::info!(contest = %contest_id, name = %assignments.name, "Onboarding contest");

        self.store
            .insert_contest(&NewContest {
                id: contest_id.to_string(),
                name: assignments.name,
                start_at: assignments.start_at,
                end_at: assignments.end_at,
            })
            .await?;

        for problem in assignments.problems {
            if self.store.problem_exists(&problem.id).await? {
                continue;
            }
            self.store
                .insert_problem(&NewProblem {
                    id: problem.id,
                    contest_id: contest_id.to_string(),
                    name: problem.name,
                })
                .await?;
        }

        Ok(true)
    }
}
