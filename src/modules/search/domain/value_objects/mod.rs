pub mod output_type;
pub mod site_index;
pub mod source_rating;

pub use output_type::OutputType;
pub use site_index::SiteIndex;
pub use source_rating::SourceRating;
