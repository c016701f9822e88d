//! Errors raised while fetching or parsing index documents.

use thiserror::Error;

/// Failure to obtain a usable index document from one source.
///
/// None of these are fatal to resolution; the loaders swallow them and move
/// on to the next source or to template-only candidates.
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("malformed document: {0}")]
    Malformed(String),
}

impl DocumentError {
    /// Creates a network error from any displayable cause.
    #[must_use]
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self::Network(cause.to_string())
    }

    /// Creates a parse error from any displayable cause.
    #[must_use]
    pub fn malformed(cause: impl std::fmt::Display) -> Self {
        Self::Malformed(cause.to_string())
    }
}
