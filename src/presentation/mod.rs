//! Presentation layer with UI components and event handling.

/// Input control composition.
pub mod control;
/// Event handling.
pub mod events;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use control::{
    ControlAction, ControlConfig, IdPreviewControl, remove_global_clear_hook,
    set_global_clear_hook,
};
pub use ui::App;
