//! NAVITIME error types

use thiserror::Error;

/// Errors that can occur during provider operations
#[derive(Debug, Error)]
pub enum NavitimeError {
    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a provider response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The provider reported an error inside a 200 response body
    #[error("Provider error {code:?}: {message}")]
    Provider {
        /// Provider status code from the response body, if any
        code: Option<u16>,
        /// Provider error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl NavitimeError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
