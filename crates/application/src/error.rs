//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error (transit provider, messaging platform)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Delivering an outbound message failed
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Request rejected before reaching a collaborator
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    ///
    /// Delivery failures are deliberately not retryable: the notification
    /// boundary substitutes an apology response instead of retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}
