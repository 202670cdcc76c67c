//! Retained-mode overlay controls rendered through a 2D sprite layer.
//!
//! Each control is a positioned rectangle inside a host window whose only
//! visual output is a sprite-drawn texture; native painting beneath it is
//! suppressed. The host delivers mouse events and one `render` call per
//! frame tick, all on one thread, and provides the services in [`host`].

pub mod event;
pub mod host;
pub mod control;
pub mod button;
pub mod window;
pub mod frame;


pub use crate::{
    event::MouseButton,
    host::{
        FixedHost,
        Host,
        NativePaint,
    },
    control::OverlayControl,
    button::{
        Button,
        ButtonState,
    },
    window::OverlayWindow,
    frame::{
        run_frame,
        Control,
    },
};
