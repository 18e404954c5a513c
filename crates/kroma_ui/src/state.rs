//! Widget state types owned by the application.
//!
//! Widgets are rebuilt every frame, so interaction state that must survive
//! between frames lives here and is passed back to the application through
//! `on_state_change` callbacks.

use crate::color::{saturation_coordinates, Color, PlanePosition};

/// The picker's drag interaction state machine: idle → dragging → idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerDragging {
    /// Not dragging.
    #[default]
    Idle,
    /// Dragging on the saturation/value plane.
    Plane,
    /// Dragging on the hue strip.
    Strip,
}

impl PickerDragging {
    /// Check if currently dragging either control.
    pub fn is_dragging(&self) -> bool {
        !matches!(self, PickerDragging::Idle)
    }
}

/// State for the color picker widget.
///
/// The color and both indicator positions are replaced wholesale on every
/// commit; nothing here is mutated field-by-field after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    /// Current color, with hex/RGB/HSV all populated.
    pub color: Color,
    /// Plane indicator position (x = saturation, y = 100 - value).
    pub plane: PlanePosition,
    /// Hue indicator position as a percentage along the strip.
    pub hue_position: f32,
    /// Drag interaction state.
    pub dragging: PickerDragging,
}

impl PickerState {
    /// Create picker state for an initial color.
    ///
    /// Both indicator positions are derived from the color so the indicators
    /// and the readout agree from the first frame.
    pub fn new(color: Color) -> Self {
        let plane = saturation_coordinates(&color);
        let hue_position = color.hsv.h / 360.0 * 100.0;
        Self {
            color,
            plane,
            hue_position,
            dragging: PickerDragging::Idle,
        }
    }

    /// Enter a drag state.
    pub fn start_drag(&mut self, target: PickerDragging) {
        self.dragging = target;
    }

    /// Return to idle.
    pub fn stop_drag(&mut self) {
        self.dragging = PickerDragging::Idle;
    }
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new(Color::black())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse_color;

    #[test]
    fn new_state_derives_indicator_positions() {
        let state = PickerState::new(parse_color("#884646"));
        assert!((state.plane.x - 48.5).abs() < 0.1);
        assert!((state.plane.y - 46.7).abs() < 0.1);
        assert_eq!(state.hue_position, 0.0);
        assert_eq!(state.dragging, PickerDragging::Idle);

        let state = PickerState::new(parse_color("#00ffff"));
        assert!((state.hue_position - 50.0).abs() < 0.001, "cyan sits mid-strip");
    }

    #[test]
    fn drag_state_machine_round_trip() {
        let mut state = PickerState::default();
        assert!(!state.dragging.is_dragging());

        state.start_drag(PickerDragging::Plane);
        assert!(state.dragging.is_dragging());
        assert_eq!(state.dragging, PickerDragging::Plane);

        state.stop_drag();
        assert_eq!(state.dragging, PickerDragging::Idle);

        state.start_drag(PickerDragging::Strip);
        assert_eq!(state.dragging, PickerDragging::Strip);
        state.stop_drag();
        assert!(!state.dragging.is_dragging());
    }
}
