use thiserror::Error;

/// Transport-level failures reported by an `HttpFetcher`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Request timed out")]
    Timeout,

    #[error("Failed to connect to remote host")]
    Connection,

    #[error("Remote host returned HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to read response body: {message}")]
    Body { message: String },

    #[error("Request failed: {message}")]
    Request { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Drop the URL so form payloads and query strings never reach a log line
        let err = err.without_url();
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Connection
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
            }
        } else if err.is_body() || err.is_decode() {
            ApiError::Body {
                message: err.to_string(),
            }
        } else {
            ApiError::Request {
                message: err.to_string(),
            }
        }
    }
}
