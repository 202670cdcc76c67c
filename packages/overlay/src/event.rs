//! Types which may exist transiently to convey mouse events.
//!
//! The host window system delivers events to a control with control-local
//! coordinates: `on_mouse_enter`, `on_mouse_leave`, `on_mouse_down`,
//! `on_mouse_up`, and `on_mouse_move` carrying the button held during the
//! move, if any.


/// A mouse button, as delivered by the host window system.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}
