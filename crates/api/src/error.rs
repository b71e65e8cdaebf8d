//! API error types.

use wkdash_storage::StorageError;

/// Result type for data access.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while fetching data.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token was rejected
    #[error("API token rejected (401)")]
    Unauthorized,

    /// Too many requests
    #[error("rate limited by WaniKani (429)")]
    RateLimited,

    /// Any other non-success status
    #[error("WaniKani API error (status {status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response body did not parse
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response parsed but is missing something required
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Cache failure
    #[error("cache error: {0}")]
    Cache(#[from] StorageError),
}

impl ApiError {
    /// Whether retrying later could succeed.
    ///
    /// Stale cache entries are only served in place of transient failures.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Http(_) | ApiError::RateLimited => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::RateLimited.is_transient());
        assert!(ApiError::Status { status: 503, body: String::new() }.is_transient());
        assert!(!ApiError::Status { status: 404, body: String::new() }.is_transient());
        assert!(!ApiError::Unauthorized.is_transient());
        assert!(!ApiError::Malformed("x".into()).is_transient());
    }
}
