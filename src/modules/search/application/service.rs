use serde_json::Value;
use std::sync::Arc;

use super::config::SearchConfig;
use super::dto::SearchResponse;
use super::rating_resolver::RatingResolver;
use crate::modules::search::domain::{SiteIndex, SourceRating, SourceResult};
use crate::modules::search::infrastructure::{HttpFetcher, ReqwestFetcher, ResponseReshaper};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation, Validator};

const SERVICE_NAME: &str = "SauceNAO";

/// Stages of one search run; any stage may fail the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Validating,
    RateLimitCheck,
    Requesting,
    Reshaping,
    RatingResolution,
    Filtering,
    Done,
}

/// Runs reverse image searches against the configured service
pub struct SearchPipeline {
    config: Arc<SearchConfig>,
    fetcher: Arc<dyn HttpFetcher>,
    resolver: RatingResolver,
}

impl SearchPipeline {
    pub fn new(config: Arc<SearchConfig>, fetcher: Arc<dyn HttpFetcher>) -> AppResult<Self> {
        let resolver = RatingResolver::new(config.fetch_timeout)?;
        Ok(Self {
            config,
            fetcher,
            resolver,
        })
    }

    /// Pipeline over a reqwest client using the config's fetch timeout
    pub fn with_reqwest(config: Arc<SearchConfig>) -> AppResult<Self> {
        let fetcher = ReqwestFetcher::new(config.fetch_timeout).map_err(|e| {
            AppError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;
        Self::new(config, Arc::new(fetcher))
    }

    pub fn with_resolver(mut self, resolver: RatingResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for the sources of `image_url`.
    ///
    /// Expected failures come back as a message plus an empty result list,
    /// never as an error.
    pub async fn search(&self, image_url: &str, result_count: Option<u32>) -> SearchResponse {
        let timer = TimedOperation::new("reverse image search");
        LogContext::search_operation(image_url, None);

        let response = SearchResponse::from(self.try_search(image_url, result_count).await);

        match &response.error {
            None => {
                LogContext::search_operation(image_url, Some(response.results.len()));
                timer.finish();
            }
            Some(error) => {
                LogContext::error_with_context(error, "Search failed");
                timer.finish_with_info("failed");
            }
        }

        response
    }

    /// Same as `search` but with failures as `Err`
    pub async fn try_search(
        &self,
        image_url: &str,
        result_count: Option<u32>,
    ) -> AppResult<Vec<Option<SourceResult>>> {
        Self::enter(SearchStage::Validating);
        if !self.config.output_type.is_supported() {
            return Err(AppError::InvalidInput(format!(
                "Output type {:?} is not supported; only JSON responses can be decoded",
                self.config.output_type
            )));
        }
        let image_url = Validator::validate_image_url(image_url, &self.config.allowed_extensions)?;
        let result_count = result_count.unwrap_or(self.config.default_result_count);
        Validator::validate_result_count(result_count)?;

        Self::enter(SearchStage::RateLimitCheck);
        if self.config.ignore_rate_limits {
            log::debug!("Rate limits ignored by configuration");
        } else {
            self.config.check_rate_limits().await?;
        }

        Self::enter(SearchStage::Requesting);
        let raw = self.request(image_url.as_str(), result_count).await?;

        Self::enter(SearchStage::Reshaping);
        ResponseReshaper::check_status(&raw)?;
        let results = ResponseReshaper::decode(raw)?;

        Self::enter(SearchStage::RatingResolution);
        let resolved = if self.config.return_ratings {
            self.resolver
                .resolve_slots(results, self.fetcher.as_ref(), self.config.rating_policy())
                .await
        } else {
            results
                .into_iter()
                .map(|slot| slot.map(|result| result.with_rating(SourceRating::Unknown)))
                .collect()
        };

        Self::enter(SearchStage::Filtering);
        let empty = resolved.iter().filter(|slot| slot.is_none()).count();
        if empty > 0 {
            log::info!(
                "Search: {} of {} result slots empty (withheld by policy or without source URLs)",
                empty,
                resolved.len()
            );
        }

        Self::enter(SearchStage::Done);
        Ok(resolved)
    }

    /// (short-term, long-term) searches left before the limiters refuse
    pub async fn remaining_uses(&self) -> (u32, u32) {
        self.config.remaining_uses().await
    }

    async fn request(&self, image_url: &str, result_count: u32) -> AppResult<Value> {
        let endpoint = self.config.api_endpoint.as_str();
        LogContext::api_call(SERVICE_NAME, endpoint, "POST", None);
        let timer = TimedOperation::new("search request");

        let response = self
            .fetcher
            .post_form(endpoint, self.form_fields(image_url, result_count))
            .await?;

        LogContext::api_call(
            SERVICE_NAME,
            endpoint,
            &response.status.to_string(),
            Some(timer.elapsed_ms()),
        );

        if !response.is_success() {
            return Err(AppError::UpstreamError(format!(
                "{} returned HTTP {}",
                SERVICE_NAME, response.status
            )));
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    fn form_fields(&self, image_url: &str, result_count: u32) -> Vec<(String, String)> {
        let config = &self.config;
        let test_mode = if config.test_mode { "1" } else { "0" };

        let mut fields = vec![
            ("api_key".to_string(), config.api_key().expose().to_string()),
            ("output_type".to_string(), config.output_type.code().to_string()),
            ("numres".to_string(), result_count.to_string()),
            ("testmode".to_string(), test_mode.to_string()),
            ("url".to_string(), image_url.to_string()),
            ("db".to_string(), SiteIndex::ALL_DATABASES.to_string()),
        ];
        if let Some(mask) = config.enabled_mask() {
            fields.push(("dbmask".to_string(), mask.to_string()));
        }
        if let Some(mask) = config.disabled_mask() {
            fields.push(("dbmaski".to_string(), mask.to_string()));
        }

        fields
    }

    fn enter(stage: SearchStage) {
        log::debug!("Search stage: {:?}", stage);
    }
}
