//! Tokenlens - a terminal image previewer for numbered collections.
//!
//! This crate resolves a small integer identifier to a displayable image
//! by probing candidate sources in priority order - a lazily-built
//! metadata index, a secondary index, then conventional image paths - and
//! couples that pipeline to a digit-only input control with a live
//! preview pane.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing resolution services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "tokenlens";
