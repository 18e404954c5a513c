//! Centralized theme system for kroma_ui.
//!
//! Provides dark and light themes with consistent color palettes. Widgets
//! use theme colors instead of hardcoded values.

use crate::renderer::Color;

/// A complete color theme for the UI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main application background
    pub background: Color,

    /// Surface/panel background (slightly lighter than background)
    pub surface: Color,

    /// Readout field background (the hex box)
    pub input_bg: Color,

    /// Default border color
    pub border: Color,

    /// Primary text color (high contrast)
    pub text_primary: Color,

    /// Secondary text color (labels)
    pub text_secondary: Color,

    /// Accent color (active drag indicator)
    pub accent: Color,

    /// Divider lines between sections
    pub divider: Color,
}

impl Theme {
    /// Create the default dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0.09, 0.09, 0.11),
            surface: Color::rgb(0.13, 0.13, 0.16),
            input_bg: Color::rgb(0.11, 0.11, 0.14),
            border: Color::rgb(0.20, 0.20, 0.26),
            text_primary: Color::rgb(0.95, 0.95, 0.97),
            text_secondary: Color::rgb(0.58, 0.58, 0.65),
            accent: Color::rgb(0.40, 0.58, 0.98),
            divider: Color::rgba(1.0, 1.0, 1.0, 0.06),
        }
    }

    /// Create a light theme.
    pub fn light() -> Self {
        Self {
            background: Color::rgb(0.97, 0.97, 0.98),
            surface: Color::rgb(1.0, 1.0, 1.0),
            input_bg: Color::rgb(0.99, 0.99, 1.0),
            border: Color::rgb(0.82, 0.82, 0.86),
            text_primary: Color::rgb(0.12, 0.12, 0.15),
            text_secondary: Color::rgb(0.45, 0.45, 0.52),
            accent: Color::rgb(0.35, 0.52, 0.92),
            divider: Color::rgba(0.0, 0.0, 0.0, 0.08),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

use std::sync::OnceLock;

/// Global theme singleton so widgets can get default colors without the
/// theme being threaded through every draw call.
static CURRENT_THEME: OnceLock<Theme> = OnceLock::new();

/// Set the global theme (can only be called once).
///
/// Returns `Err` with the provided theme if a theme has already been set.
pub fn set_theme(theme: Theme) -> Result<(), Theme> {
    CURRENT_THEME.set(theme)
}

/// Get the current global theme (or the dark theme if not set).
pub fn current_theme() -> &'static Theme {
    CURRENT_THEME.get_or_init(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors_valid() {
        let theme = Theme::dark();

        assert!(theme.background.r >= 0.0 && theme.background.r <= 1.0);
        assert!(theme.text_primary.r >= 0.0 && theme.text_primary.r <= 1.0);
        assert!(theme.accent.r >= 0.0 && theme.accent.r <= 1.0);
        assert!(theme.divider.a >= 0.0 && theme.divider.a <= 1.0);
    }

    #[test]
    fn test_dark_theme_contrast() {
        let theme = Theme::dark();

        // Text should be lighter than background (dark theme).
        assert!(theme.text_primary.r > theme.background.r);
        assert!(theme.text_primary.g > theme.background.g);
        assert!(theme.text_primary.b > theme.background.b);
    }

    #[test]
    fn test_light_theme_contrast() {
        let theme = Theme::light();

        assert!(theme.text_primary.r < theme.background.r);
        assert!(theme.text_primary.g < theme.background.g);
        assert!(theme.text_primary.b < theme.background.b);
    }

    #[test]
    fn test_default_is_dark() {
        let default = Theme::default();
        let dark = Theme::dark();

        assert!((default.background.r - dark.background.r).abs() < 0.001);
        assert!((default.text_primary.r - dark.text_primary.r).abs() < 0.001);
    }
}
