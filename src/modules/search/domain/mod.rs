pub mod entities;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::SourceResult;
pub use services::{RatingExtractor, RatingStrategy, RatingStrategyTable};
pub use value_objects::{OutputType, SiteIndex, SourceRating};
