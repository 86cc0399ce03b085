//! Reverse image search client.
//!
//! Submits an image URL to the search service, repairs its split
//! `{header, data}` response layout into typed [`SourceResult`]s, rates each
//! result's explicitness by scraping its source page, and withholds or
//! annotates results according to the caller's [`SearchConfig`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use sauce_lens::{SearchConfig, SearchPipeline};
//!
//! # async fn run() -> Result<(), sauce_lens::AppError> {
//! sauce_lens::init_logger();
//! let config = Arc::new(SearchConfig::from_env()?.with_prevent_explicit_results(true));
//! let pipeline = SearchPipeline::with_reqwest(config)?;
//!
//! let response = pipeline.search("https://example.com/image.jpg", None).await;
//! for result in response.visible() {
//!     println!("{} ({:.1}%): {}", result.website_name, result.similarity, result.primary_url());
//! }
//! # Ok(())
//! # }
//! ```

pub mod modules;
pub mod shared;

pub use modules::search::{
    ApiKey, FetchResponse, HttpFetcher, OutputType, RatingPolicy, RatingResolver, ReqwestFetcher,
    ResponseReshaper, SearchConfig, SearchPipeline, SearchResponse, SearchStage, SiteIndex,
    SourceRating, SourceResult,
};
pub use shared::errors::{ApiError, AppError, AppResult};
pub use shared::utils::{init_logger, RateLimiter, RateLimiterPair};
