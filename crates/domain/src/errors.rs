//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
///
/// The normalization engine itself never fails; malformed input degrades
/// to empty strings and zero values. Errors only arise at the boundary,
/// when inbound text claims to be a route payload and is not.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Inbound text is not a serialized route
    #[error("Not a route payload: {0}")]
    UnparseableRoute(String),
}
