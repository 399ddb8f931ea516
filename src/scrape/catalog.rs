//! Root-listing parser

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// Extract contest slugs from the root listing.
///
/// Contests are linked as `https://{slug}.<base_host>/...`; the first
/// occurrence of each slug wins and listing order is preserved.
pub fn parse_contest_ids(document: &Html, base_host: &str) -> Vec<String> {
    let Ok(pattern) = Regex::new(&format!(
        r"^https?://([a-z0-9\-]+)\.{}",
        regex::escape(base_host)
    )) else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(caps) = pattern.captures(href) {
            let slug = caps[1].to_string();
            if !ids.contains(&slug) {
                ids.push(slug);
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <a href="https://abc042.judge.example.jp/">ABC 042</a>
          <a href="http://arc058.judge.example.jp/assignments">ARC 058</a>
          <a href="https://abc042.judge.example.jp/standings">dup</a>
          <a href="https://elsewhere.example.com/">other site</a>
          <a href="/local/path">relative</a>
        </body></html>
    "#;

    #[test]
    fn test_parse_contest_ids() {
        let document = Html::parse_document(LISTING);
        let ids = parse_contest_ids(&document, "judge.example.jp");
        assert_eq!(ids, vec!["abc042", "arc058"]);
    }

    #[test]
    fn test_other_hosts_ignored() {
        let document = Html::parse_document(LISTING);
        let ids = parse_contest_ids(&document, "example.org");
        assert!(ids.is_empty());
    }
}
