//! Widget implementations.

mod color_picker;

pub use color_picker::{color_picker, ColorPicker};
