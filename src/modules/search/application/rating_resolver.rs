use futures::future::join_all;
use std::time::Duration;
use tokio::time::timeout;

use super::config::RatingPolicy;
use crate::modules::search::domain::{RatingStrategy, RatingStrategyTable, SourceRating, SourceResult};
use crate::modules::search::infrastructure::HttpFetcher;
use crate::shared::errors::{AppError, AppResult};

/// Assigns explicitness ratings to search results.
///
/// The strategy for a result depends only on its site index. A failed or
/// timed out page fetch degrades that one result to `Unknown`; it never
/// fails the search.
pub struct RatingResolver {
    table: RatingStrategyTable,
    fetch_timeout: Duration,
}

impl RatingResolver {
    pub fn new(fetch_timeout: Duration) -> AppResult<Self> {
        let table = RatingStrategyTable::standard().map_err(|e| {
            AppError::ConfigurationError(format!("Invalid rating pattern: {}", e))
        })?;
        Ok(Self::with_table(table, fetch_timeout))
    }

    pub fn with_table(table: RatingStrategyTable, fetch_timeout: Duration) -> Self {
        Self {
            table,
            fetch_timeout,
        }
    }

    /// Raw rating for one result, before policy
    pub async fn rate(&self, result: &SourceResult, fetcher: &dyn HttpFetcher) -> SourceRating {
        match self.table.strategy_for(result.index) {
            RatingStrategy::Unrated => SourceRating::Unknown,
            RatingStrategy::Fixed(rating) => rating,
            RatingStrategy::Fetch(extractor) => {
                let url = result.primary_url();
                match timeout(self.fetch_timeout, fetcher.get_text(url)).await {
                    Ok(Ok(page)) => {
                        let rating = extractor.extract(&page);
                        log::debug!(
                            "Rating: {} via {} -> {}",
                            result.website_name,
                            extractor.name(),
                            rating
                        );
                        rating
                    }
                    Ok(Err(e)) => {
                        let degraded = AppError::FetchDegraded(format!(
                            "{} page fetch failed: {}",
                            result.website_name, e
                        ));
                        log::warn!("{}", degraded);
                        SourceRating::Unknown
                    }
                    Err(_) => {
                        let degraded = AppError::FetchDegraded(format!(
                            "{} page fetch timed out after {:?}",
                            result.website_name, self.fetch_timeout
                        ));
                        log::warn!("{}", degraded);
                        SourceRating::Unknown
                    }
                }
            }
        }
    }

    /// Rate one result and apply policy; `None` means the result is withheld
    pub async fn resolve(
        &self,
        result: SourceResult,
        fetcher: &dyn HttpFetcher,
        policy: RatingPolicy,
    ) -> Option<SourceResult> {
        let rating = self.rate(&result, fetcher).await;
        Self::apply_policy(result.with_rating(rating), policy)
    }

    /// Resolve every result concurrently, keeping input positions
    pub async fn resolve_all(
        &self,
        results: Vec<SourceResult>,
        fetcher: &dyn HttpFetcher,
        policy: RatingPolicy,
    ) -> Vec<Option<SourceResult>> {
        self.resolve_slots(results.into_iter().map(Some).collect(), fetcher, policy)
            .await
    }

    /// Like `resolve_all`, but empty slots pass through untouched
    pub async fn resolve_slots(
        &self,
        slots: Vec<Option<SourceResult>>,
        fetcher: &dyn HttpFetcher,
        policy: RatingPolicy,
    ) -> Vec<Option<SourceResult>> {
        join_all(slots.into_iter().map(move |slot| async move {
            match slot {
                Some(result) => self.resolve(result, fetcher, policy).await,
                None => None,
            }
        }))
        .await
    }

    /// Promote `Unknown` when asked, then withhold explicit results when asked
    pub fn apply_policy(mut result: SourceResult, policy: RatingPolicy) -> Option<SourceResult> {
        if result.rating == SourceRating::Unknown && policy.treat_unknown_as_questionable {
            result.rating = SourceRating::Questionable;
        }

        if policy.prevent_explicit_results && result.rating.is_explicit() {
            log::debug!(
                "Withholding {} result rated {}",
                result.website_name,
                result.rating
            );
            return None;
        }

        Some(result)
    }
}
