pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{
    ApiKey, RatingPolicy, RatingResolver, SearchConfig, SearchPipeline, SearchResponse,
    SearchStage,
};
pub use domain::{OutputType, SiteIndex, SourceRating, SourceResult};
pub use infrastructure::{FetchResponse, HttpFetcher, ReqwestFetcher, ResponseReshaper};
