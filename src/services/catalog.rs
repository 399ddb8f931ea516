//! Contest catalog

use crate::scrape::ContestSite;

/// Discovers the contest identifiers currently listed on the judge site
pub struct ContestCatalog<'a> {
    site: &'a dyn ContestSite,
}

impl<'a> ContestCatalog<'a> {
    pub fn new(site: &'a dyn ContestSite) -> Self {
        Self { site }
    }

    /// Contest slugs from the root listing.
    ///
    /// A fetch failure means "nothing new this round" and yields an empty
    /// sequence; discovery is retried on the next cycle anyway.
    pub async fn discover(&self) -> Vec<String> {
        match self.site.contest_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Contest discovery failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::scrape::MockContestSite;

    #[tokio::test]
    async fn test_discover_passes_listing_through() {
        let mut site = MockContestSite::new();
        site.expect_contest_ids()
            .returning(|| Ok(vec!["abc042".to_string(), "arc058".to_string()]));

        let ids = ContestCatalog::new(&site).discover().await;
        assert_eq!(ids, vec!["abc042", "arc058"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty() {
        let mut site = MockContestSite::new();
        site.expect_contest_ids()
            .returning(|| Err(AppError::Fetch("timeout".to_string())));

        let ids = ContestCatalog::new(&site).discover().await;
        assert!(ids.is_empty());
    }
}
