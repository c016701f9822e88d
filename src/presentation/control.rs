//! Identifier input control coupling validation and the live preview.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use parking_lot::RwLock;
use tracing::debug;

use crate::application::PreviewService;
use crate::domain::entities::{NormalizedId, normalize};
use crate::presentation::events;
use crate::presentation::widgets::IdInput;

/// Callback fired when a valid identifier is applied.
pub type ApplyCallback = Box<dyn Fn(&str) + Send + Sync>;
/// Callback fired whenever validity may have changed.
pub type ValidChangeCallback = Box<dyn Fn(bool, &NormalizedId) + Send + Sync>;
/// Callback fired when the control is cleared.
pub type ClearCallback = Box<dyn Fn() + Send + Sync>;

/// Process-wide hook invoked on every clear action of any control,
/// receiving the control's name.
pub type GlobalClearHook = Arc<dyn Fn(&str) + Send + Sync>;

static GLOBAL_CLEAR_HOOK: RwLock<Option<GlobalClearHook>> = RwLock::new(None);

/// Registers the process-wide clear hook, replacing any previous one.
pub fn set_global_clear_hook(hook: impl Fn(&str) + Send + Sync + 'static) {
    *GLOBAL_CLEAR_HOOK.write() = Some(Arc::new(hook));
}

/// Removes the process-wide clear hook.
pub fn remove_global_clear_hook() {
    *GLOBAL_CLEAR_HOOK.write() = None;
}

fn invoke_global_clear_hook(name: &str) {
    let hook = GLOBAL_CLEAR_HOOK.read().clone();
    if let Some(hook) = hook {
        hook(name);
    }
}

/// What a key press did to the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    /// The key was not for this control.
    Ignored,
    /// The value or cursor changed.
    Edited,
    /// A valid identifier was applied.
    Applied(String),
    /// The clear affordance fired.
    Cleared,
}

/// Configuration for an [`IdPreviewControl`].
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Label rendered on the input field.
    pub label: String,
    /// Identifier used when the input is empty.
    pub default_id: String,
    /// Inclusive upper bound for identifiers.
    pub max_id: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            label: "token id".to_string(),
            default_id: "8929".to_string(),
            max_id: crate::domain::entities::DEFAULT_MAX_ID,
        }
    }
}

/// A digit-only input wired to the identifier normalizer and, optionally,
/// a live preview.
///
/// Every edit re-runs normalization, fires `on_valid_change`, and drives
/// the attached preview: a valid identifier is applied, an emptied input
/// resets to the default, and invalid-but-non-empty text leaves the
/// preview untouched.
pub struct IdPreviewControl {
    name: String,
    input: IdInput,
    state: NormalizedId,
    preview: Option<Arc<PreviewService>>,
    config: ControlConfig,
    on_apply: Option<ApplyCallback>,
    on_valid_change: Option<ValidChangeCallback>,
    on_clear: Option<ClearCallback>,
}

impl IdPreviewControl {
    /// Creates a control named `name` (the name is passed to the global
    /// clear hook).
    #[must_use]
    pub fn new(name: impl Into<String>, config: ControlConfig) -> Self {
        let name = name.into();
        let input = IdInput::new(config.label.clone())
            .placeholder(format!("0–{}", config.max_id));
        Self {
            name,
            input,
            state: normalize("", config.max_id),
            preview: None,
            config,
            on_apply: None,
            on_valid_change: None,
            on_clear: None,
        }
    }

    /// Attaches the preview service this control drives.
    #[must_use]
    pub fn with_preview(mut self, preview: Arc<PreviewService>) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Registers the apply callback.
    #[must_use]
    pub fn on_apply(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_apply = Some(Box::new(f));
        self
    }

    /// Registers the validity-change callback.
    #[must_use]
    pub fn on_valid_change(
        mut self,
        f: impl Fn(bool, &NormalizedId) + Send + Sync + 'static,
    ) -> Self {
        self.on_valid_change = Some(Box::new(f));
        self
    }

    /// Registers the clear callback.
    #[must_use]
    pub fn on_clear(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_clear = Some(Box::new(f));
        self
    }

    /// Applies the startup state: a usable identifier lands in the input
    /// and the preview, anything else resets the preview to the default.
    pub fn start(&mut self, initial: Option<&str>) {
        self.input.set_focused(true);
        match initial {
            Some(raw) if normalize(raw, self.config.max_id).valid => self.set_value(raw),
            _ => self.reset_preview(),
        }
    }

    /// Returns the current input text.
    #[must_use]
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Replaces the input text (stripping non-digits) and re-runs the
    /// change pipeline.
    pub fn set_value(&mut self, value: &str) {
        self.input.set_value(value);
        self.changed();
    }

    /// Returns the latest normalization result.
    #[must_use]
    pub fn normalized(&self) -> &NormalizedId {
        &self.state
    }

    /// Whether apply is currently possible (the button-enabled analog).
    #[must_use]
    pub fn can_apply(&self) -> bool {
        self.state.valid
    }

    /// Borrows the input widget for rendering.
    #[must_use]
    pub fn input(&self) -> &IdInput {
        &self.input
    }

    /// Forces the preview back to the configured default identifier.
    pub fn reset_preview(&self) {
        if let Some(preview) = &self.preview {
            let preview = preview.clone();
            tokio::spawn(async move { preview.reset().await });
        }
    }

    /// Forces the preview to a specific identifier, bypassing the input.
    pub fn apply_preview(&self, id: &str) {
        if let Some(preview) = &self.preview {
            let preview = preview.clone();
            let id = id.to_string();
            tokio::spawn(async move { preview.apply(&id).await });
        }
    }

    /// Handles a key press, returning what it did.
    pub fn handle_key(&mut self, key: &KeyEvent) -> ControlAction {
        if events::is_clear_event(key) {
            self.clear();
            return ControlAction::Cleared;
        }

        if events::is_submit_event(key) {
            if self.state.valid {
                let id = self.state.value.clone();
                if let Some(f) = &self.on_apply {
                    f(&id);
                }
                return ControlAction::Applied(id);
            }
            return ControlAction::Ignored;
        }

        let edited = match key.code {
            KeyCode::Char(c) => self.input.input_char(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => {
                self.input.move_left();
                return ControlAction::Edited;
            }
            KeyCode::Right => {
                self.input.move_right();
                return ControlAction::Edited;
            }
            KeyCode::Home => {
                self.input.move_start();
                return ControlAction::Edited;
            }
            KeyCode::End => {
                self.input.move_end();
                return ControlAction::Edited;
            }
            _ => return ControlAction::Ignored,
        };

        if edited {
            self.changed();
            ControlAction::Edited
        } else {
            ControlAction::Ignored
        }
    }

    /// Empties the input, fires the clear callbacks and hook, re-runs the
    /// change pipeline, and refocuses the input.
    pub fn clear(&mut self) {
        self.input.clear();

        if let Some(f) = &self.on_clear {
            f();
        }
        invoke_global_clear_hook(&self.name);

        self.changed();
        self.input.set_focused(true);
    }

    fn changed(&mut self) {
        let was_valid = self.state.valid;
        self.state = normalize(self.input.value(), self.config.max_id);

        if let Some(f) = &self.on_valid_change {
            f(self.state.valid, &self.state);
        }
        if was_valid != self.state.valid {
            debug!(name = %self.name, valid = self.state.valid, "Validity changed");
        }

        if self.preview.is_some() {
            if self.state.empty {
                self.reset_preview();
            } else if self.state.valid {
                self.apply_preview(&self.state.value);
            }
        }
    }
}

impl std::fmt::Debug for IdPreviewControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdPreviewControl")
            .field("name", &self.name)
            .field("value", &self.input.value())
            .field("valid", &self.state.valid)
            .finish_non_exhaustive()
    }
}
