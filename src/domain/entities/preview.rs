//! Preview pane state and the current-request token.
//!
//! Several `apply` invocations can be in flight at once. The model records
//! which identifier was requested most recently; every asynchronous
//! completion must pass that token check before mutating the visible state,
//! and stale completions are discarded. Last token wins; nothing is ever
//! aborted.

use std::sync::Arc;

use parking_lot::RwLock;

/// What the preview pane currently shows.
#[derive(Debug, Clone, Default)]
pub enum PreviewContent {
    /// Nothing requested yet.
    #[default]
    Blank,
    /// Placeholder badge shown while resolution proceeds.
    Badge(String),
    /// A successfully loaded image for the identifier.
    Image(String, Arc<image::DynamicImage>),
    /// Every candidate for the identifier failed to load.
    Unavailable(String),
}

/// Mutable state behind one preview pane.
#[derive(Debug, Default)]
pub struct PreviewModel {
    token: Option<String>,
    loading: bool,
    content: PreviewContent,
}

impl PreviewModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a resolution for the current token is running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the most recently requested identifier.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the visible content.
    #[must_use]
    pub const fn content(&self) -> &PreviewContent {
        &self.content
    }

    /// Returns true when `id` is still the most recent request.
    #[must_use]
    pub fn is_current(&self, id: &str) -> bool {
        self.token.as_deref() == Some(id)
    }

    /// Records `id` as the current request and shows its placeholder badge.
    pub fn begin(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.token = Some(id.clone());
        self.loading = true;
        self.content = PreviewContent::Badge(id);
    }

    /// Publishes a loaded image for `id`.
    ///
    /// Returns false without touching the model when `id` has been
    /// superseded by a newer request.
    pub fn publish(&mut self, id: &str, image: Arc<image::DynamicImage>) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.loading = false;
        self.content = PreviewContent::Image(id.to_string(), image);
        true
    }

    /// Records that every candidate for `id` failed.
    ///
    /// Ignored when `id` has been superseded; the newer request owns the
    /// loading marker.
    pub fn exhaust(&mut self, id: &str) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.loading = false;
        self.content = PreviewContent::Unavailable(id.to_string());
        true
    }
}

/// Preview state shared between the UI thread and resolution tasks.
pub type SharedPreview = Arc<RwLock<PreviewModel>>;

/// Creates a fresh shared preview model.
#[must_use]
pub fn shared_preview() -> SharedPreview {
    Arc::new(RwLock::new(PreviewModel::new()))
}
