//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A body path expression could not be parsed.
    #[error("invalid path expression: {0}")]
    InvalidPathExpression(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
