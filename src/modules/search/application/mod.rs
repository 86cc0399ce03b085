pub mod config;
pub mod dto;
pub mod rating_resolver;
pub mod service;

pub use config::{ApiKey, RatingPolicy, SearchConfig};
pub use dto::SearchResponse;
pub use rating_resolver::RatingResolver;
pub use service::{SearchPipeline, SearchStage};
