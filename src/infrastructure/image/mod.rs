pub mod resizer;

pub use resizer::{fit_dimensions, img_resize, ImageKind, ResizeError, JPEG_QUALITY};
