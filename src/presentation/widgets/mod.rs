mod id_input;
mod preview_pane;

pub use id_input::IdInput;
pub use preview_pane::PreviewPane;
