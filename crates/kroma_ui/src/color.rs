//! Color conversion utilities.
//!
//! This module provides the conversions between hex strings, 8-bit RGB, and
//! HSV that back the picker widget. Malformed input never errors: anything
//! unparseable degrades to black, and numeric components are clamped.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color. Canonical byte-level representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An HSV color.
///
/// Hue is in degrees. The hue strip's right edge produces exactly 360, which
/// is kept as-is and treated as sector 0 by [`hsv_to_rgb`]; everywhere else
/// hue stays in `[0, 360)`. Saturation and value are percentages in
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

/// A color with all three representations populated.
///
/// The fields are derived once at construction and are not re-synchronized
/// afterwards; state updates replace the whole value instead of mutating it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub hex: String,
    pub rgb: Rgb,
    pub hsv: Hsv,
}

impl Color {
    /// Build a color from its RGB representation.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hex: rgb_to_hex(rgb),
            rgb,
            hsv: rgb_to_hsv(rgb),
        }
    }

    /// Black, the fallback for unparseable input.
    pub fn black() -> Self {
        Self::from_rgb(Rgb::BLACK)
    }
}

/// The plane indicator position, in percentages of the plane's extent.
///
/// `x` is saturation, `y` is `100 - value` (the plane's value axis points
/// up, screen y points down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanePosition {
    pub x: f32,
    pub y: f32,
}

/// Bound a value to `[min, max]`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.clamp(min, max)
}

/// Parse a color from a `#rrggbb` hex string or an `rgb(r, g, b)` string.
///
/// Unrecognized input yields black; no error is raised.
pub fn parse_color(input: &str) -> Color {
    let input = input.trim();
    if input.starts_with('#') {
        Color::from_rgb(hex_to_rgb(input))
    } else if input.starts_with("rgb") {
        Color::from_rgb(parse_rgb_components(input))
    } else {
        Color::black()
    }
}

/// Parse the numeric components out of an `rgb(r, g, b)` string.
///
/// Missing or non-numeric components read as 0; out-of-range components are
/// clamped to 0..=255.
fn parse_rgb_components(input: &str) -> Rgb {
    let inner = input
        .trim_start_matches("rgb")
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');

    let mut parts = inner.split(',');
    let mut channel = || {
        parts
            .next()
            .and_then(|part| part.trim().parse::<i64>().ok())
            .map(|n| n.clamp(0, 255) as u8)
            .unwrap_or(0)
    };

    let r = channel();
    let g = channel();
    let b = channel();
    Rgb::new(r, g, b)
}

/// Convert a 6-digit hex string (leading `#` optional) to RGB.
///
/// Invalid input yields black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Rgb::BLACK;
    }

    let channel = |range| u8::from_str_radix(&digits[range], 16).unwrap_or(0);
    Rgb::new(channel(0..2), channel(2..4), channel(4..6))
}

/// Convert RGB to a lowercase `#rrggbb` string.
///
/// Lossless round-trip with [`hex_to_rgb`] for all inputs.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Convert RGB to HSV.
///
/// Hue is computed with the six-sector formula and is 0 for achromatic
/// colors (zero chroma); saturation is 0 when value is 0.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r as f32 / 255.0;
    let g = rgb.g as f32 / 255.0;
    let b = rgb.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta + if g < b { 6.0 } else { 0.0 })
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max * 100.0 };
    let v = max * 100.0;

    Hsv::new(h, s, v)
}

/// Convert HSV to RGB.
///
/// Channels are rounded to integers, so a round-trip through
/// [`rgb_to_hsv`] is within ±1 per channel rather than bit-exact. A hue of
/// 360 wraps to sector 0.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = clamp(hsv.h, 0.0, 360.0);
    let s = clamp(hsv.s, 0.0, 100.0) / 100.0;
    let v = clamp(hsv.v, 0.0, 100.0) / 100.0;

    let sector = (h / 60.0).floor();
    let f = h / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Derive the plane indicator position for a color.
///
/// Saturation and value are re-derived from the color's RGB rather than
/// read from its stored HSV.
pub fn saturation_coordinates(color: &Color) -> PlanePosition {
    let hsv = rgb_to_hsv(color.rgb);
    PlanePosition {
        x: hsv.s,
        y: 100.0 - hsv.v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#884646", "#0a1b2c", "#f0e1d2"] {
            assert_eq!(rgb_to_hex(hex_to_rgb(hex)), hex);
        }
    }

    #[test]
    fn test_hex_without_hash() {
        assert_eq!(hex_to_rgb("884646"), Rgb::new(136, 70, 70));
    }

    #[test]
    fn test_invalid_hex_is_black() {
        assert_eq!(hex_to_rgb("#88464"), Rgb::BLACK);
        assert_eq!(hex_to_rgb("#8846467"), Rgb::BLACK);
        assert_eq!(hex_to_rgb("#88zz46"), Rgb::BLACK);
        assert_eq!(hex_to_rgb(""), Rgb::BLACK);
    }

    #[test]
    fn test_parse_reference_color() {
        let color = parse_color("#884646");
        assert_eq!(color.rgb, Rgb::new(136, 70, 70));
        assert!(color.hsv.h.abs() < 0.001, "r > g = b means hue 0");
        assert!((color.hsv.s - 48.5).abs() < 0.1);
        assert!((color.hsv.v - 53.3).abs() < 0.1);
    }

    #[test]
    fn test_parse_rgb_string() {
        let color = parse_color("rgb(136, 70, 70)");
        assert_eq!(color.rgb, Rgb::new(136, 70, 70));
        assert_eq!(color.hex, "#884646");

        let color = parse_color("rgb(255,0,128)");
        assert_eq!(color.rgb, Rgb::new(255, 0, 128));
    }

    #[test]
    fn test_parse_rgb_string_clamps_components() {
        let color = parse_color("rgb(300, -5, 128)");
        assert_eq!(color.rgb, Rgb::new(255, 0, 128));
    }

    #[test]
    fn test_parse_unrecognized_is_black() {
        assert_eq!(parse_color("").rgb, Rgb::BLACK);
        assert_eq!(parse_color("hsl(0, 0%, 0%)").rgb, Rgb::BLACK);
        assert_eq!(parse_color("not a color").rgb, Rgb::BLACK);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 100.0, 100.0)), Rgb::new(255, 0, 0));
        assert_eq!(
            hsv_to_rgb(Hsv::new(120.0, 100.0, 100.0)),
            Rgb::new(0, 255, 0)
        );
        assert_eq!(
            hsv_to_rgb(Hsv::new(240.0, 100.0, 100.0)),
            Rgb::new(0, 0, 255)
        );
    }

    #[test]
    fn test_hue_360_wraps_to_red() {
        assert_eq!(
            hsv_to_rgb(Hsv::new(360.0, 100.0, 100.0)),
            Rgb::new(255, 0, 0)
        );
    }

    #[test]
    fn test_achromatic_hue_is_zero() {
        for gray in [0u8, 64, 128, 255] {
            let hsv = rgb_to_hsv(Rgb::new(gray, gray, gray));
            assert_eq!(hsv.h, 0.0);
            assert_eq!(hsv.s, 0.0);
        }
    }

    #[test]
    fn test_hsv_round_trip_within_one() {
        // Sample the RGB cube rather than sweeping all 16M points.
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(17) {
                    let rgb = Rgb::new(r as u8, g as u8, b as u8);
                    let back = hsv_to_rgb(rgb_to_hsv(rgb));
                    assert!(
                        (back.r as i16 - rgb.r as i16).abs() <= 1
                            && (back.g as i16 - rgb.g as i16).abs() <= 1
                            && (back.b as i16 - rgb.b as i16).abs() <= 1,
                        "{:?} round-tripped to {:?}",
                        rgb,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        // Degenerate range collapses to the bound.
        assert_eq!(clamp(7.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_saturation_coordinates_full() {
        let color = parse_color("#ff0000");
        let pos = saturation_coordinates(&color);
        assert_eq!(pos.x, 100.0);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_saturation_coordinates_black() {
        let pos = saturation_coordinates(&Color::black());
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, 100.0);
    }
}
