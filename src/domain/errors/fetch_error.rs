//! Errors raised while loading a candidate image.

use thiserror::Error;

/// Failure to turn one candidate URL into a displayable image.
///
/// The preview controller treats every variant the same way: advance to the
/// next candidate.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body did not decode as an image.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl FetchError {
    /// Creates a network error from any displayable cause.
    #[must_use]
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self::Network(cause.to_string())
    }

    /// Creates a decode error from any displayable cause.
    #[must_use]
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::Decode(cause.to_string())
    }
}
