//! Submission-feed parser

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use scraper::{Html, Selector};

use super::{FeedPage, FeedRow};
use crate::models::Verdict;
use crate::utils::time::parse_judge_timestamp;

static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("valid selector"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid selector"));

static PAGE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/submissions/all/([0-9]+)").expect("valid regex"));
static SUBMISSION_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/submissions/([0-9]+)$").expect("valid regex"));
static TASK_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/tasks/([0-9A-Za-z_]+)$").expect("valid regex"));
static USER_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/users/([0-9A-Za-z_\-]+)$").expect("valid regex"));

/// Parse one page of the submission feed.
///
/// Returns every row with its status parsed into a [`Verdict`]; the caller
/// decides what an in-flight-judging row means for the batch. Rows missing a
/// submission link or the core cells are skipped.
pub fn parse_feed_page(document: &Html) -> FeedPage {
    let mut last_linked_page = 1;
    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(caps) = PAGE_HREF.captures(href) {
            if let Ok(page) = caps[1].parse::<u32>() {
                last_linked_page = last_linked_page.max(page);
            }
        }
    }

    let mut rows = Vec::new();
    for row in document.select(&ROW) {
        let mut id: Option<i64> = None;
        let mut problem_id = String::new();
        let mut user_name = String::new();

        for anchor in row.select(&ANCHOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if let Some(caps) = SUBMISSION_HREF.captures(href) {
                id = caps[1].parse().ok();
            } else if let Some(caps) = TASK_HREF.captures(href) {
                problem_id = caps[1].to_string();
            } else if let Some(caps) = USER_HREF.captures(href) {
                user_name = caps[1].to_string();
            }
        }

        let cells: Vec<String> = row
            .select(&CELL)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();

        let Some(id) = id else {
            continue;
        };
        if cells.len() < 7 {
            continue;
        }

        // Only rows wide enough to carry the execution-time column have one.
        let exec_time = if cells.len() == 10 {
            parse_suffixed_int(&cells[7], "ms")
        } else {
            0
        };

        rows.push(FeedRow {
            id,
            problem_id,
            user_name,
            language: cells[3].clone(),
            source_length: parse_suffixed_int(&cells[5], "Byte"),
            status_label: cells[6].clone(),
            verdict: Verdict::from_label(&cells[6]),
            exec_time,
            created_at: parse_judge_timestamp(&cells[0]).unwrap_or(NaiveDateTime::default()),
        });
    }

    FeedPage {
        rows,
        last_linked_page,
    }
}

/// Parse an integer cell like "123 Byte" or "45 ms"; malformed values
/// degrade to 0 rather than dropping the row.
fn parse_suffixed_int(value: &str, suffix: &str) -> i32 {
    value
        .trim()
        .strip_suffix(suffix)
        .unwrap_or(value)
        .trim()
        .parse()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, status: &str, with_exec: bool) -> String {
        let exec = if with_exec {
            "<td>17 ms</td><td>256 KB</td>"
        } else {
            ""
        };
        format!(
            r#"<tr>
                 <td>2016-05-21 21:00:{:02}</td>
                 <td><a href="/tasks/abc042_a">A</a></td>
                 <td><a href="/users/someone">someone</a></td>
                 <td>C++14 (GCC 5.4.1)</td>
                 <td>100</td>
                 <td>1527 Byte</td>
                 <td>{}</td>
                 {}
                 <td><a href="/submissions/{}">Detail</a></td>
               </tr>"#,
            id % 60,
            status,
            exec,
            id
        )
    }

    fn page(rows: &[String], max_page: u32) -> String {
        format!(
            r#"<html><body>
                 <a href="/submissions/all/{}">last</a>
                 <a href="/submissions/all/2">2</a>
                 <table><tbody>{}</tbody></table>
               </body></html>"#,
            max_page,
            rows.join("")
        )
    }

    #[test]
    fn test_parse_rows_and_pagination() {
        let html = page(&[row(1001, "AC", true), row(1000, "WA", false)], 37);
        let document = Html::parse_document(&html);
        let parsed = parse_feed_page(&document);

        assert_eq!(parsed.last_linked_page, 37);
        assert_eq!(parsed.rows.len(), 2);

        let first = &parsed.rows[0];
        assert_eq!(first.id, 1001);
        assert_eq!(first.problem_id, "abc042_a");
        assert_eq!(first.user_name, "someone");
        assert_eq!(first.language, "C++14 (GCC 5.4.1)");
        assert_eq!(first.source_length, 1527);
        assert_eq!(first.verdict, Verdict::Accepted);
        assert_eq!(first.exec_time, 17);

        // Rows without the execution-time column default to 0.
        assert_eq!(parsed.rows[1].exec_time, 0);
        assert_eq!(parsed.rows[1].verdict, Verdict::WrongAnswer);
    }

    #[test]
    fn test_judging_rows_are_flagged_not_dropped() {
        let html = page(&[row(1002, "3/15", false), row(1001, "AC", false)], 1);
        let document = Html::parse_document(&html);
        let parsed = parse_feed_page(&document);

        assert_eq!(parsed.rows.len(), 2);
        assert!(!parsed.rows[0].verdict.is_terminal());
        assert!(parsed.rows[1].verdict.is_terminal());
    }

    #[test]
    fn test_malformed_length_defaults_to_zero() {
        assert_eq!(parse_suffixed_int("1527 Byte", "Byte"), 1527);
        assert_eq!(parse_suffixed_int("n/a", "Byte"), 0);
        assert_eq!(parse_suffixed_int("", "ms"), 0);
    }

    #[test]
    fn test_empty_feed() {
        let document = Html::parse_document("<html><body>no table</body></html>");
        let parsed = parse_feed_page(&document);
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.last_linked_page, 1);
    }
}
