//! The host window seam: what overlay controls consume from, and report to,
//! the windowing system.

use vek::*;


/// Host window services consumed by overlay controls.
///
/// The host owns control placement, event delivery, and the cursor; controls
/// call back into it to query the parent's geometry and to restrict cursor
/// movement during a drag.
pub trait Host {
    /// The parent control's client rectangle, in screen space.
    fn parent_client_bounds(&self) -> Rect<f32, f32>;

    /// Restrict cursor movement to `clip` in screen space, or remove any
    /// restriction with `None`.
    fn clip_cursor(&mut self, clip: Option<Rect<f32, f32>>);
}


/// How a control wants the host to treat native painting beneath it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NativePaint {
    /// The host must not paint any native background or foreground; the
    /// sprite draw is the control's only visual output, and whatever is
    /// rendered beneath the control shows through untouched.
    Suppressed,
}


/// Fixed-geometry host: a parent rectangle and the currently installed
/// cursor clip. Suitable for headless hosts and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedHost {
    parent: Rect<f32, f32>,
    clip: Option<Rect<f32, f32>>,
}

impl FixedHost {
    pub fn new(parent: Rect<f32, f32>) -> Self {
        FixedHost {
            parent,
            clip: None,
        }
    }

    /// The currently installed cursor clip, if any.
    pub fn cursor_clip(&self) -> Option<Rect<f32, f32>> {
        self.clip
    }
}

impl Host for FixedHost {
    fn parent_client_bounds(&self) -> Rect<f32, f32> {
        self.parent
    }

    fn clip_cursor(&mut self, clip: Option<Rect<f32, f32>>) {
        self.clip = clip;
    }
}
