use serde::Serialize;

use crate::modules::search::domain::SourceResult;
use crate::shared::errors::{AppError, AppResult};

pub const SUCCESS_MESSAGE: &str = "Success.";

/// Outcome of one search.
///
/// `results` keeps one slot per returned match; slots withheld by policy or
/// lacking source URLs are `None` so positions line up with what the service
/// returned. On failure
/// `results` is empty and `error` holds the typed reason.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub message: String,
    pub results: Vec<Option<SourceResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AppError>,
}

impl SearchResponse {
    pub fn success(results: Vec<Option<SourceResult>>) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            results,
            error: None,
        }
    }

    pub fn failure(error: AppError) -> Self {
        Self {
            message: error.to_string(),
            results: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Results that were not withheld, in order
    pub fn visible(&self) -> impl Iterator<Item = &SourceResult> {
        self.results.iter().flatten()
    }

    pub fn into_parts(self) -> (String, Vec<Option<SourceResult>>) {
        (self.message, self.results)
    }
}

impl From<AppResult<Vec<Option<SourceResult>>>> for SearchResponse {
    fn from(outcome: AppResult<Vec<Option<SourceResult>>>) -> Self {
        match outcome {
            Ok(results) => Self::success(results),
            Err(error) => Self::failure(error),
        }
    }
}
