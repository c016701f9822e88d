//! Domain entity definitions.

mod identifier;
mod image;
mod preview;

pub use identifier::{DEFAULT_MAX_ID, NormalizedId, normalize, strip_non_digits};
pub use image::{FetchedImage, ImageId, ImageSource};
pub use preview::{PreviewContent, PreviewModel, SharedPreview, shared_preview};
