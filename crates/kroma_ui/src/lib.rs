//! kroma_ui - a small widget layer built on wgpu.
//!
//! Provides the color math, the interactive color-picker widget, and the
//! callback-based widget/application runtime it runs inside.

mod application;
mod callback;
mod element;
mod error;
mod event;
mod layout;
mod renderer;
mod widget;

pub mod color;
pub mod constants;
pub mod gradient;
pub mod state;
pub mod theme;
pub mod widgets;

pub use application::{run, run_with_settings, Application, Settings};
pub use callback::Callback;
pub use element::Element;
pub use error::Error;
pub use event::{Event, MouseButton};
pub use layout::{Bounds, Point, Size};
pub use renderer::{Color, Gradient, Renderer};
pub use state::{PickerDragging, PickerState};
pub use widget::{EventResult, Widget};
pub use widgets::{color_picker, ColorPicker};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::application::{run, run_with_settings, Application, Settings};
    pub use crate::color::{parse_color, Color as PickedColor};
    pub use crate::element::Element;
    pub use crate::event::{Event, MouseButton};
    pub use crate::layout::{Bounds, Point, Size};
    pub use crate::state::{PickerDragging, PickerState};
    pub use crate::widgets::color_picker;
}
