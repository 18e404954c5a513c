use crate::Point;

/// Events that widgets can respond to.
///
/// The picker is pointer-driven only; there is no keyboard input surface
/// (the hex field is a read-only readout).
#[derive(Debug, Clone)]
pub enum Event {
    /// Mouse button pressed.
    MousePressed { button: MouseButton, position: Point },
    /// Mouse button released.
    MouseReleased { button: MouseButton, position: Point },
    /// Mouse moved.
    MouseMoved { position: Point },
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}
