pub mod candidate_resolver;
pub mod preview_service;

pub use candidate_resolver::CandidateResolver;
pub use preview_service::{PreviewEvent, PreviewOutcome, PreviewService};
