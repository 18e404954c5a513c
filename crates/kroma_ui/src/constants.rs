//! Centralized constants for kroma_ui.

/// Default font size used across widgets.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Smaller font size for secondary text (labels).
pub const SMALL_FONT_SIZE: f32 = 11.0;

/// Approximate character width as a ratio of font size.
/// Used for text measurement approximation.
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Line height as a ratio of font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Approximate line height for a font size.
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

/// Approximate rendered width of a string at a font size.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_WIDTH_FACTOR
}
