//! Backend API error types.

use thiserror::Error;

/// Errors from talking to the backend.
///
/// List fetchers never surface these to callers; they log and degrade to an
/// empty list. User creation folds them into [`crate::CreateUserError`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The backend returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A required setting is missing.
    #[error("not configured: {0}")]
    NotConfigured(String),
}
