//! Client error types
//!
//! Only terminal conditions surface here: 401/403 and unexpected statuses
//! are fatal, while rate limiting and connection-level failures are
//! absorbed by the retry loop (unless a bounded [`RetryPolicy`] runs out
//! of attempts).
//!
//! [`RetryPolicy`]: crate::rest::RetryPolicy

use thiserror::Error;

/// Result type alias using [`ClientError`]
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the remote API
#[derive(Debug, Error)]
pub enum ClientError {
    /// 403: the account lacks permission for the operation. Never retried.
    #[error("Forbidden result 403 occurred when {description} with base URL: {base_url}. Please check that the provided email address has the necessary permissions.")]
    Permissions {
        base_url: String,
        description: String,
    },

    /// 401: the email/token pair was rejected. Never retried.
    #[error("Unauthorized result 401 occurred when {description} with base URL: {base_url}. Please check that the provided email address and API token are correct.")]
    Credentials {
        base_url: String,
        description: String,
    },

    /// Any other unexpected status. Terminal.
    #[error("Error when {description} with base URL: {base_url}, resource: {resource}, result status code: {status}")]
    Request {
        status: u16,
        base_url: String,
        resource: String,
        description: String,
    },

    /// A bounded retry policy ran out of attempts
    #[error("Gave up after {attempts} attempts when {description} with base URL: {base_url}")]
    RetriesExhausted {
        attempts: u32,
        base_url: String,
        description: String,
    },

    /// HTTP transport error outside the retry loop (e.g. client build)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
