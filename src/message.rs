//! Messages produced by the UI.

use kroma_ui::color::Color;
use kroma_ui::PickerState;

#[derive(Debug, Clone)]
pub enum Message {
    /// The picker replaced its state (color, indicator positions, drag).
    Picker(PickerState),
    /// A color was committed by a press or drag move.
    ColorPicked(Color),
}
