//! Problem listing with per-user and rival overlays

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    db::repositories::{ProblemRepository, SubmissionRepository},
    error::AppResult,
    handlers::problems::response::ProblemStatusEntry,
    models::submission::ACCEPTED_LABEL,
};

/// Problem service for the query API
pub struct ProblemService;

impl ProblemService {
    /// All problems, with the given user's status and the rivals' accepts
    /// overlaid
    pub async fn list_with_status(
        pool: &PgPool,
        user: &str,
        rivals: &[String],
    ) -> AppResult<Vec<ProblemStatusEntry>> {
        let rows = ProblemRepository::list_with_authors(pool).await?;

        let mut entries: Vec<ProblemStatusEntry> = Vec::with_capacity(rows.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len());
        for row in rows {
            index.insert(row.id.clone(), entries.len());
            entries.push(ProblemStatusEntry {
                id: row.id,
                contest: row.contest_id,
                name: row.name,
                difficulty: row.difficulty,
                shortest: row.shortest_user,
                fastest: row.fastest_user,
                first: row.first_user,
                status: String::new(),
                rivals: Vec::new(),
            });
        }

        if !user.is_empty() {
            for submission in SubmissionRepository::statuses_for_user(pool, user).await? {
                let Some(&i) = index.get(&submission.problem_id) else {
                    continue;
                };
                // An accept is sticky; anything else shows the latest label.
                if entries[i].status != ACCEPTED_LABEL {
                    entries[i].status = submission.status;
                }
            }
        }

        if !rivals.is_empty() {
            for accepted in SubmissionRepository::accepted_for_users(pool, rivals).await? {
                if let Some(&i) = index.get(&accepted.problem_id) {
                    entries[i].rivals.push(accepted.user_name);
                }
            }
            for entry in &mut entries {
                entry.rivals.sort();
                entry.rivals.dedup();
            }
        }

        Ok(entries)
    }
}
