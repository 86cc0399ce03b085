use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use super::api_error::ApiError;

/// Failure modes of a search run.
///
/// Every variant renders a distinct message; `SearchPipeline::search` reports
/// them as data instead of propagating them to the caller.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rate limit exceeded ({limiter}), retry after {} seconds", .retry_after.as_secs())]
    RateLimited {
        limiter: String,
        #[serde(skip)]
        retry_after: Duration,
    },

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Rating fetch degraded: {0}")]
    FetchDegraded(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AppError {
    /// Whether waiting and trying again can succeed without a code or input change
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::RateLimited { .. } | AppError::UpstreamError(_) | AppError::FetchDegraded(_)
        )
    }

    /// Hint for `RateLimited`, `None` for every other variant
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            AppError::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InvalidInput(format!("Invalid URL: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ConfigurationError(format!("Invalid number: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_message_includes_hint() {
        let err = AppError::RateLimited {
            limiter: "short-term".to_string(),
            retry_after: Duration::from_secs(30),
        };
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded (short-term), retry after 30 seconds"
        );
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_caller_errors_are_not_retryable() {
        assert!(!AppError::InvalidInput("bad".into()).is_retryable());
        assert!(!AppError::MalformedResponse("bad".into()).is_retryable());
        assert!(AppError::UpstreamError("503".into()).is_retryable());
    }

    #[test]
    fn test_api_error_becomes_upstream_error() {
        let err: AppError = ApiError::Status { status: 503 }.into();
        assert!(matches!(err, AppError::UpstreamError(_)));
    }
}
