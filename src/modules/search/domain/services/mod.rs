pub mod rating_strategies;

pub use rating_strategies::{
    rating_from_word, AdultFlagExtractor, MarkerExtractor, RatingExtractor, RatingFieldExtractor,
    RatingStrategy, RatingStrategyTable,
};
