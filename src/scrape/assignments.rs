//! Assignments-page parser

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{AssignmentProblem, ContestAssignments};
use crate::utils::time::parse_judge_timestamp;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span time").expect("valid selector"));
static CONTEST_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".contest-name").expect("valid selector"));
static TASK_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/tasks/([0-9A-Za-z_]+)$").expect("valid regex"));

/// Extract contest metadata and the task list from an assignments page.
///
/// The page links every task twice (name column and score column); link texts
/// for the same task are joined with `". "`, first-seen order preserved.
pub fn parse_assignments(document: &Html) -> ContestAssignments {
    let mut problems: Vec<AssignmentProblem> = Vec::new();
    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(caps) = TASK_HREF.captures(href) else {
            continue;
        };
        let id = caps[1].to_string();
        let text = element.text().collect::<String>().trim().to_string();

        match problems.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                if !text.is_empty() {
                    existing.name.push_str(". ");
                    existing.name.push_str(&text);
                }
            }
            None => problems.push(AssignmentProblem { id, name: text }),
        }
    }

    let times: Vec<String> = document
        .select(&TIME)
        .map(|t| t.text().collect::<String>())
        .collect();

    let name = document
        .select(&CONTEST_NAME)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    ContestAssignments {
        name,
        start_at: times.first().and_then(|t| parse_judge_timestamp(t)),
        end_at: times.get(1).and_then(|t| parse_judge_timestamp(t)),
        problems,
    }
}
