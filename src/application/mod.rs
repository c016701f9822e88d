//! Application layer with resolution services.

/// Service implementations.
pub mod services;

pub use services::{CandidateResolver, PreviewEvent, PreviewOutcome, PreviewService};
