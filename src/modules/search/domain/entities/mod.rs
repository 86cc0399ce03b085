pub mod source_result;

pub use source_result::SourceResult;
