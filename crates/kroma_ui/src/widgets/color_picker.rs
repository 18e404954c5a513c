//! Interactive color picker widget.
//!
//! Renders a saturation/value plane, a hue strip, a preview swatch, and a
//! read-only hex readout. Interaction state lives in [`PickerState`], owned
//! by the application and passed back through `on_state_change`; the
//! committed color additionally fires `on_change`.

use crate::callback::Callback;
use crate::color::{clamp, hsv_to_rgb, rgb_to_hex, Color as PickedColor, Hsv, PlanePosition};
use crate::constants::{line_height, text_width, DEFAULT_FONT_SIZE, SMALL_FONT_SIZE};
use crate::event::{Event, MouseButton};
use crate::layout::{Bounds, Point, Size};
use crate::renderer::{Color, Gradient, Renderer};
use crate::state::{PickerDragging, PickerState};
use crate::widget::{EventResult, Widget};

/// Size of the saturation/value plane
const PLANE_WIDTH: f32 = 256.0;
const PLANE_HEIGHT: f32 = 176.0;
/// Height of the hue strip
const STRIP_HEIGHT: f32 = 14.0;
/// Padding around the picker content
const PADDING: f32 = 12.0;
/// Vertical spacing between sections
const SECTION_SPACING: f32 = 12.0;
/// Side of the preview swatch
const SWATCH_SIZE: f32 = 40.0;
/// Gap between the swatch and the hex readout column
const SWATCH_GAP: f32 = 10.0;
/// Height of the hex readout box
const HEX_BOX_HEIGHT: f32 = 26.0;
/// Vertical room for the readout label above the box
const LABEL_HEIGHT: f32 = 14.0;
/// Radius of the plane indicator ring
const PLANE_INDICATOR_RADIUS: f32 = 7.0;
/// Radius of the strip indicator ring
const STRIP_INDICATOR_RADIUS: f32 = 8.0;
/// Ring thickness for both indicators
const INDICATOR_THICKNESS: f32 = 2.0;

/// The color picker widget.
pub struct ColorPicker<M> {
    /// External state (cloned from app state each frame)
    state: PickerState,
    /// Callback when a color is committed (press or drag move)
    on_change: Callback<PickedColor, M>,
    /// Callback carrying the replaced state back to the application
    on_state_change: Callback<PickerState, M>,
}

impl<M> ColorPicker<M> {
    /// Create a picker reflecting the given state.
    pub fn new(state: &PickerState) -> Self {
        Self {
            state: state.clone(),
            on_change: Callback::none(),
            on_state_change: Callback::none(),
        }
    }

    /// Set the color-commit callback.
    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(PickedColor) -> M + 'static,
    {
        self.on_change = Callback::new(handler);
        self
    }

    /// Set the state-replacement callback.
    pub fn on_state_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(PickerState) -> M + 'static,
    {
        self.on_state_change = Callback::new(handler);
        self
    }

    /// Total size of the picker content.
    pub fn content_size() -> Size {
        Size::new(
            PADDING * 2.0 + PLANE_WIDTH,
            PADDING * 2.0
                + PLANE_HEIGHT
                + SECTION_SPACING
                + STRIP_HEIGHT
                + SECTION_SPACING
                + LABEL_HEIGHT
                + HEX_BOX_HEIGHT,
        )
    }

    /// Top-left corner of the content, centered within larger bounds.
    fn content_origin(bounds: Bounds) -> Point {
        let size = Self::content_size();
        Point::new(
            bounds.x + ((bounds.width - size.width) / 2.0).max(0.0),
            bounds.y + ((bounds.height - size.height) / 2.0).max(0.0),
        )
    }

    fn plane_bounds(origin: Point) -> Bounds {
        Bounds::new(
            origin.x + PADDING,
            origin.y + PADDING,
            PLANE_WIDTH,
            PLANE_HEIGHT,
        )
    }

    fn strip_bounds(origin: Point) -> Bounds {
        Bounds::new(
            origin.x + PADDING,
            origin.y + PADDING + PLANE_HEIGHT + SECTION_SPACING,
            PLANE_WIDTH,
            STRIP_HEIGHT,
        )
    }

    fn footer_y(origin: Point) -> f32 {
        origin.y + PADDING + PLANE_HEIGHT + SECTION_SPACING + STRIP_HEIGHT + SECTION_SPACING
    }

    fn swatch_bounds(origin: Point) -> Bounds {
        Bounds::new(
            origin.x + PADDING,
            Self::footer_y(origin),
            SWATCH_SIZE,
            SWATCH_SIZE,
        )
    }

    fn hex_box_bounds(origin: Point) -> Bounds {
        Bounds::new(
            origin.x + PADDING + SWATCH_SIZE + SWATCH_GAP,
            Self::footer_y(origin) + LABEL_HEIGHT,
            PLANE_WIDTH - SWATCH_SIZE - SWATCH_GAP,
            HEX_BOX_HEIGHT,
        )
    }

    /// Commit a plane interaction at an absolute pointer position.
    ///
    /// The position is clamped to the plane bounds, so drags keep tracking
    /// while the pointer is outside the control. Hue is held fixed.
    fn apply_plane(&mut self, position: Point, origin: Point) -> EventResult<M> {
        let plane = Self::plane_bounds(origin);
        let x = clamp(position.x - plane.x, 0.0, plane.width);
        let y = clamp(position.y - plane.y, 0.0, plane.height);

        let s = x / plane.width * 100.0;
        let v = 100.0 - y / plane.height * 100.0;
        let hsv = Hsv::new(self.state.color.hsv.h, s, v);

        self.state.color = color_from_hsv(hsv);
        self.state.plane = PlanePosition { x: s, y: 100.0 - v };
        self.emit()
    }

    /// Commit a strip interaction at an absolute pointer position.
    ///
    /// Saturation and value are held fixed; the right edge yields exactly
    /// 360 degrees.
    fn apply_strip(&mut self, position: Point, origin: Point) -> EventResult<M> {
        let strip = Self::strip_bounds(origin);
        let x = clamp(position.x - strip.x, 0.0, strip.width);

        let h = (x / strip.width * 360.0).round();
        let hsv = Hsv::new(h, self.state.color.hsv.s, self.state.color.hsv.v);

        self.state.color = color_from_hsv(hsv);
        self.state.hue_position = x / strip.width * 100.0;
        self.emit()
    }

    /// Fire the state-replacement and color-commit callbacks.
    fn emit(&self) -> EventResult<M> {
        EventResult::None
            .push(self.on_state_change.call(self.state.clone()))
            .push(self.on_change.call(self.state.color.clone()))
    }

    fn indicator_color(&self, target: PickerDragging) -> Color {
        let theme = crate::theme::current_theme();
        if self.state.dragging == target {
            theme.accent
        } else {
            Color::WHITE
        }
    }
}

/// Build a color from a commanded HSV, deriving hex and RGB from it.
///
/// The HSV is stored as commanded, not re-derived from the rounded RGB:
/// hue stays fixed across plane drags and the strip's right edge reports
/// exactly 360.
fn color_from_hsv(hsv: Hsv) -> PickedColor {
    let rgb = hsv_to_rgb(hsv);
    PickedColor {
        hex: rgb_to_hex(rgb),
        rgb,
        hsv,
    }
}

impl<M> Widget<M> for ColorPicker<M> {
    fn layout(&mut self, _available: Size) -> Size {
        Self::content_size()
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        let theme = crate::theme::current_theme();
        let origin = Self::content_origin(bounds);

        // Panel card behind the content.
        let size = Self::content_size();
        let card = Bounds::new(origin.x, origin.y, size.width, size.height);
        renderer.fill_rect(card, theme.surface);
        renderer.stroke_rect(card, theme.divider, 1.0);

        // Saturation/value plane with its indicator.
        let plane = Self::plane_bounds(origin);
        let hue_degrees = clamp(self.state.color.hsv.h, 0.0, 360.0).round() as u16;
        renderer.gradient(plane, Gradient::SaturationValue { hue_degrees });
        renderer.stroke_rect(plane, theme.border, 1.0);

        let indicator = Point::new(
            plane.x + self.state.plane.x / 100.0 * plane.width,
            plane.y + self.state.plane.y / 100.0 * plane.height,
        );
        renderer.fill_circle(
            indicator,
            PLANE_INDICATOR_RADIUS - INDICATOR_THICKNESS,
            self.state.color.rgb.into(),
        );
        renderer.stroke_circle(
            indicator,
            PLANE_INDICATOR_RADIUS,
            self.indicator_color(PickerDragging::Plane),
            INDICATOR_THICKNESS,
        );

        // Hue strip with its indicator.
        let strip = Self::strip_bounds(origin);
        renderer.gradient(strip, Gradient::HueSpectrum);
        renderer.stroke_rect(strip, theme.border, 1.0);

        let strip_indicator = Point::new(
            strip.x + self.state.hue_position / 100.0 * strip.width,
            strip.center().y,
        );
        let strip_hue = hsv_to_rgb(Hsv::new(self.state.color.hsv.h, 100.0, 100.0));
        renderer.fill_circle(
            strip_indicator,
            STRIP_INDICATOR_RADIUS - INDICATOR_THICKNESS,
            strip_hue.into(),
        );
        renderer.stroke_circle(
            strip_indicator,
            STRIP_INDICATOR_RADIUS,
            self.indicator_color(PickerDragging::Strip),
            INDICATOR_THICKNESS,
        );

        // Divider between the controls and the readout row.
        let divider_y = Self::footer_y(origin) - SECTION_SPACING / 2.0;
        renderer.fill_rect(
            Bounds::new(origin.x + PADDING, divider_y, PLANE_WIDTH, 1.0),
            theme.divider,
        );

        // Preview swatch.
        let swatch = Self::swatch_bounds(origin);
        renderer.fill_rect(swatch, self.state.color.rgb.into());
        renderer.stroke_rect(swatch, theme.border, 1.0);

        // Read-only hex readout.
        let hex_box = Self::hex_box_bounds(origin);
        renderer.text(
            "HEX",
            Point::new(hex_box.x, Self::footer_y(origin)),
            SMALL_FONT_SIZE,
            theme.text_secondary,
        );
        renderer.fill_rect(hex_box, theme.input_bg);
        renderer.stroke_rect(hex_box, theme.border, 1.0);

        let hex = &self.state.color.hex;
        let text_x = hex_box.x + (hex_box.width - text_width(hex, DEFAULT_FONT_SIZE)) / 2.0;
        let text_y = hex_box.y + (hex_box.height - line_height(DEFAULT_FONT_SIZE)) / 2.0;
        renderer.text(
            hex,
            Point::new(text_x, text_y),
            DEFAULT_FONT_SIZE,
            theme.text_primary,
        );
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> EventResult<M> {
        let origin = Self::content_origin(bounds);

        match event {
            Event::MousePressed {
                button: MouseButton::Left,
                position,
            } => {
                if Self::plane_bounds(origin).contains(*position) {
                    log::debug!("ColorPicker: started plane drag");
                    self.state.start_drag(PickerDragging::Plane);
                    self.apply_plane(*position, origin)
                } else if Self::strip_bounds(origin).contains(*position) {
                    log::debug!("ColorPicker: started hue drag");
                    self.state.start_drag(PickerDragging::Strip);
                    self.apply_strip(*position, origin)
                } else {
                    EventResult::None
                }
            }

            Event::MouseMoved { position } => match self.state.dragging {
                PickerDragging::Plane => self.apply_plane(*position, origin),
                PickerDragging::Strip => self.apply_strip(*position, origin),
                PickerDragging::Idle => EventResult::None,
            },

            Event::MouseReleased {
                button: MouseButton::Left,
                ..
            } => {
                if self.state.dragging.is_dragging() {
                    log::debug!("ColorPicker: stopped dragging");
                    self.state.stop_drag();
                    EventResult::None.push(self.on_state_change.call(self.state.clone()))
                } else {
                    EventResult::None
                }
            }

            _ => EventResult::None,
        }
    }
}

/// Helper function to create a color picker.
pub fn color_picker<M>(state: &PickerState) -> ColorPicker<M> {
    ColorPicker::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse_color;

    #[derive(Debug, Clone, PartialEq)]
    enum TestMessage {
        State(PickerState),
        Committed(PickedColor),
    }

    fn picker(state: &PickerState) -> ColorPicker<TestMessage> {
        ColorPicker::new(state)
            .on_state_change(TestMessage::State)
            .on_change(TestMessage::Committed)
    }

    fn content_bounds() -> Bounds {
        let size = ColorPicker::<TestMessage>::content_size();
        Bounds::new(0.0, 0.0, size.width, size.height)
    }

    fn press(x: f32, y: f32) -> Event {
        Event::MousePressed {
            button: MouseButton::Left,
            position: Point::new(x, y),
        }
    }

    fn release() -> Event {
        Event::MouseReleased {
            button: MouseButton::Left,
            position: Point::zero(),
        }
    }

    fn committed(messages: &[TestMessage]) -> PickedColor {
        messages
            .iter()
            .find_map(|m| match m {
                TestMessage::Committed(color) => Some(color.clone()),
                _ => None,
            })
            .expect("no color committed")
    }

    fn replaced_state(messages: &[TestMessage]) -> PickerState {
        messages
            .iter()
            .find_map(|m| match m {
                TestMessage::State(state) => Some(state.clone()),
                _ => None,
            })
            .expect("no state replaced")
    }

    #[test]
    fn strip_right_edge_sets_hue_360() {
        let initial = PickerState::new(parse_color("#884646"));
        let mut widget = picker(&initial);
        let bounds = content_bounds();
        let strip = ColorPicker::<TestMessage>::strip_bounds(Point::zero());

        let messages = widget
            .on_event(&press(strip.x + strip.width, strip.center().y), bounds)
            .into_messages();

        let color = committed(&messages);
        assert_eq!(color.hsv.h, 360.0);
        assert_eq!(color.hsv.s, initial.color.hsv.s);
        assert_eq!(color.hsv.v, initial.color.hsv.v);

        let state = replaced_state(&messages);
        assert!((state.hue_position - 100.0).abs() < 0.001);
        assert_eq!(state.dragging, PickerDragging::Strip);
    }

    #[test]
    fn plane_top_right_is_pure_hue() {
        // Initial hue is 0, so the plane's top-right corner is pure red.
        let initial = PickerState::new(parse_color("#884646"));
        let mut widget = picker(&initial);
        let bounds = content_bounds();
        let plane = ColorPicker::<TestMessage>::plane_bounds(Point::zero());

        let messages = widget
            .on_event(&press(plane.x + plane.width, plane.y), bounds)
            .into_messages();

        let color = committed(&messages);
        assert_eq!(color.hex, "#ff0000");
        assert_eq!(color.hsv.s, 100.0);
        assert_eq!(color.hsv.v, 100.0);

        let state = replaced_state(&messages);
        assert_eq!(state.plane.x, 100.0);
        assert_eq!(state.plane.y, 0.0);
    }

    #[test]
    fn plane_bottom_left_is_black() {
        let initial = PickerState::new(parse_color("#884646"));
        let mut widget = picker(&initial);
        let bounds = content_bounds();
        let plane = ColorPicker::<TestMessage>::plane_bounds(Point::zero());

        let messages = widget
            .on_event(&press(plane.x, plane.y + plane.height), bounds)
            .into_messages();

        assert_eq!(committed(&messages).rgb, crate::color::Rgb::BLACK);
    }

    #[test]
    fn drag_clamps_to_plane_bounds() {
        let initial = PickerState::new(parse_color("#884646"));
        let mut widget = picker(&initial);
        let bounds = content_bounds();
        let plane = ColorPicker::<TestMessage>::plane_bounds(Point::zero());

        widget.on_event(&press(plane.center().x, plane.center().y), bounds);

        // Drag far outside the widget; the position clamps to the plane's
        // top-right corner.
        let messages = widget
            .on_event(
                &Event::MouseMoved {
                    position: Point::new(10_000.0, -500.0),
                },
                bounds,
            )
            .into_messages();

        let state = replaced_state(&messages);
        assert_eq!(state.plane.x, 100.0);
        assert_eq!(state.plane.y, 0.0);
        assert_eq!(state.color.hsv.s, 100.0);
        assert_eq!(state.color.hsv.v, 100.0);
    }

    #[test]
    fn plane_drag_holds_hue_fixed() {
        let initial = PickerState::new(parse_color("#00ff00"));
        let mut widget = picker(&initial);
        let bounds = content_bounds();
        let plane = ColorPicker::<TestMessage>::plane_bounds(Point::zero());

        widget.on_event(&press(plane.center().x, plane.center().y), bounds);
        let messages = widget
            .on_event(
                &Event::MouseMoved {
                    position: Point::new(plane.x + plane.width * 0.25, plane.center().y),
                },
                bounds,
            )
            .into_messages();

        assert_eq!(committed(&messages).hsv.h, 120.0);
    }

    #[test]
    fn release_returns_to_idle() {
        let initial = PickerState::new(parse_color("#884646"));
        let mut widget = picker(&initial);
        let bounds = content_bounds();
        let strip = ColorPicker::<TestMessage>::strip_bounds(Point::zero());

        widget.on_event(&press(strip.center().x, strip.center().y), bounds);
        let messages = widget.on_event(&release(), bounds).into_messages();

        let state = replaced_state(&messages);
        assert_eq!(state.dragging, PickerDragging::Idle);
    }

    #[test]
    fn move_without_press_changes_nothing() {
        let initial = PickerState::new(parse_color("#884646"));
        let mut widget = picker(&initial);
        let bounds = content_bounds();
        let plane = ColorPicker::<TestMessage>::plane_bounds(Point::zero());

        let result = widget.on_event(
            &Event::MouseMoved {
                position: plane.center(),
            },
            bounds,
        );

        assert!(result.into_messages().is_empty());
    }

    #[test]
    fn press_outside_controls_is_ignored() {
        let initial = PickerState::new(parse_color("#884646"));
        let mut widget = picker(&initial);
        let bounds = content_bounds();

        // Inside the padding but outside both controls.
        let result = widget.on_event(&press(1.0, 1.0), bounds);
        assert!(result.into_messages().is_empty());

        let result = widget.on_event(&release(), bounds);
        assert!(result.into_messages().is_empty());
    }

    #[test]
    fn interaction_centers_within_larger_bounds() {
        let initial = PickerState::new(parse_color("#884646"));
        let mut widget = picker(&initial);
        let size = ColorPicker::<TestMessage>::content_size();
        let bounds = Bounds::new(0.0, 0.0, size.width + 100.0, size.height + 60.0);

        let origin = Point::new(50.0, 30.0);
        let strip = ColorPicker::<TestMessage>::strip_bounds(origin);
        let messages = widget
            .on_event(&press(strip.x + strip.width / 2.0, strip.center().y), bounds)
            .into_messages();

        let state = replaced_state(&messages);
        assert!((state.hue_position - 50.0).abs() < 0.001);
    }
}
