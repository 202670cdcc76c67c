//! Draggable window control: follows the cursor while the left button is
//! held, with cursor movement clamped so the control stays inside its
//! parent.

use crate::{
    control::OverlayControl,
    event::MouseButton,
    frame::Control,
    host::{
        Host,
        NativePaint,
    },
};
use sprite2d::{
    device::Device,
    texture::Texture,
};
use std::path::Path;
use anyhow::Result;
use tracing::*;
use vek::*;


/// Live drag tracking, present only between a left press and its release.
#[derive(Debug, Copy, Clone)]
struct DragState {
    /// Press location, in control-local coordinates.
    anchor: Vec2<f32>,
}


/// A window-like overlay control the user can drag around the parent's
/// client area.
///
/// The drag is an explicit two-state machine (idle / dragging) rather than
/// dynamically attached move/up handlers, so a press can never register
/// tracking twice. While dragging, the host cursor is clipped to the region
/// that keeps the control within the parent's bounds.
pub struct OverlayWindow<D: Device> {
    base: OverlayControl<D>,
    drag: Option<DragState>,
}

impl<D: Device> OverlayWindow<D> {
    /// New window at the origin with no image bound.
    pub fn new() -> Self {
        OverlayWindow {
            base: OverlayControl::new(),
            drag: None,
        }
    }

    pub fn position(&self) -> Vec2<f32> {
        self.base.position()
    }

    pub fn size(&self) -> Extent2<f32> {
        self.base.size()
    }

    /// Screen rectangle currently covered by the control.
    pub fn bounds(&self) -> Rect<f32, f32> {
        self.base.bounds()
    }

    /// The window's texture (the drawn quad's parameters).
    pub fn texture(&self) -> &Texture<D::Image> {
        self.base.texture()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Move the window; the texture translation follows.
    pub fn set_position<V: Into<Vec2<f32>>>(&mut self, position: V) {
        self.base.set_position(position);
    }

    /// Load the window face from an image file; the control takes the
    /// image's pixel dimensions. See `OverlayControl::load_from_file`.
    pub fn load_from_file(&mut self, device: &mut D, path: &Path) -> Result<()> {
        self.base.load_from_file(device, path)
    }

    /// Draw the window face. Returns false if no image is bound.
    pub fn render(&mut self, device: &mut D) -> bool {
        self.base.render(device)
    }

    /// Native paint suppression: the sprite draw is the only visual output.
    pub fn native_paint(&self) -> NativePaint {
        self.base.native_paint()
    }

    /// The cursor clip for a press at `anchor`: the pointer may move only
    /// where the control, dragged with that press offset, stays within the
    /// parent's client bounds.
    fn drag_clip<H: Host>(&self, host: &H, anchor: Vec2<f32>) -> Rect<f32, f32> {
        let parent = host.parent_client_bounds();
        let size = self.base.size();
        Rect::new(
            parent.x + anchor.x,
            parent.y + anchor.y,
            parent.w - size.w + 1.0,
            parent.h - size.h + 1.0,
        )
    }

    /// A left press starts the drag and clamps cursor movement; a second
    /// left press mid-drag re-anchors and re-clamps. Other buttons are
    /// ignored.
    pub fn on_mouse_down<H: Host>(
        &mut self,
        host: &mut H,
        button: MouseButton,
        pos: Vec2<f32>,
    ) {
        if button != MouseButton::Left {
            return;
        }
        if self.drag.is_some() {
            debug!("re-entrant press, re-anchoring drag at {:?}", pos);
        } else {
            debug!("drag started at {:?}", pos);
        }
        self.drag = Some(DragState { anchor: pos });
        let clip = self.drag_clip(host, pos);
        host.clip_cursor(Some(clip));
    }

    /// While dragging with the left button held, the control follows the
    /// pointer by its delta from the anchor.
    pub fn on_mouse_move<H: Host>(
        &mut self,
        _host: &mut H,
        held: Option<MouseButton>,
        pos: Vec2<f32>,
    ) {
        if held != Some(MouseButton::Left) {
            return;
        }
        if let Some(drag) = self.drag {
            self.set_position(self.position() + (pos - drag.anchor));
        }
    }

    /// A left release unclamps the cursor if a drag was live and clears the
    /// drag unconditionally.
    pub fn on_mouse_up<H: Host>(
        &mut self,
        host: &mut H,
        button: MouseButton,
        _pos: Vec2<f32>,
    ) {
        if button != MouseButton::Left {
            return;
        }
        if self.drag.is_some() {
            host.clip_cursor(None);
            debug!("drag ended at {:?}", self.position());
        }
        self.drag = None;
    }

    /// Release the window's texture and any live drag. Idempotent.
    pub fn dispose(&mut self) {
        self.drag = None;
        self.base.dispose();
    }
}

impl<D: Device> Control<D> for OverlayWindow<D> {
    fn render(&mut self, device: &mut D) -> bool {
        OverlayWindow::render(self, device)
    }

    fn dispose(&mut self) {
        OverlayWindow::dispose(self)
    }
}


#[cfg(test)]
fn loaded_window() -> (sprite2d::record::RecordDevice, OverlayWindow<sprite2d::record::RecordDevice>) {
    use sprite2d::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("face.png", Extent2::new(200, 100));

    let mut window = OverlayWindow::new();
    window.load_from_file(&mut device, "face.png".as_ref()).unwrap();
    window.set_position([100.0, 100.0]);
    device.clear_commands();
    (device, window)
}

#[cfg(test)]
use crate::host::FixedHost;

#[test]
fn test_drag_moves_control_by_pointer_delta() {
    let (_, mut window) = loaded_window();
    let mut host = FixedHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));

    window.on_mouse_down(&mut host, MouseButton::Left, Vec2::new(40.0, 20.0));
    assert!(window.is_dragging());
    window.on_mouse_move(&mut host, Some(MouseButton::Left), Vec2::new(55.0, 10.0));
    assert_eq!(window.position(), Vec2::new(115.0, 90.0));
    window.on_mouse_up(&mut host, MouseButton::Left, Vec2::new(55.0, 10.0));
    assert!(!window.is_dragging());

    // moves after the release change nothing
    window.on_mouse_move(&mut host, Some(MouseButton::Left), Vec2::new(80.0, 80.0));
    assert_eq!(window.position(), Vec2::new(115.0, 90.0));
}

#[test]
fn test_drag_updates_texture_translation() {
    let (_, mut window) = loaded_window();
    let mut host = FixedHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));

    window.on_mouse_down(&mut host, MouseButton::Left, Vec2::new(10.0, 10.0));
    window.on_mouse_move(&mut host, Some(MouseButton::Left), Vec2::new(30.0, 25.0));
    assert_eq!(window.texture().translation, Vec2::new(120.0, 115.0));
}

#[test]
fn test_drag_clips_cursor_to_parent_bounds() {
    let (_, mut window) = loaded_window();
    let mut host = FixedHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));

    window.on_mouse_down(&mut host, MouseButton::Left, Vec2::new(40.0, 20.0));
    assert_eq!(
        host.cursor_clip(),
        // press offset within the control, parent extent shrunk by the
        // control extent
        Some(Rect::new(40.0, 20.0, 1280.0 - 200.0 + 1.0, 720.0 - 100.0 + 1.0)),
    );

    window.on_mouse_up(&mut host, MouseButton::Left, Vec2::new(40.0, 20.0));
    assert_eq!(host.cursor_clip(), None);
}

#[test]
fn test_reentrant_press_reanchors_and_reclips() {
    let (_, mut window) = loaded_window();
    let mut host = FixedHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));

    window.on_mouse_down(&mut host, MouseButton::Left, Vec2::new(40.0, 20.0));
    window.on_mouse_down(&mut host, MouseButton::Left, Vec2::new(5.0, 5.0));
    assert!(window.is_dragging());
    assert_eq!(
        host.cursor_clip(),
        Some(Rect::new(5.0, 5.0, 1081.0, 621.0)),
    );

    window.on_mouse_move(&mut host, Some(MouseButton::Left), Vec2::new(6.0, 7.0));
    assert_eq!(window.position(), Vec2::new(101.0, 102.0));

    // one release ends the re-anchored drag
    window.on_mouse_up(&mut host, MouseButton::Left, Vec2::new(6.0, 7.0));
    assert!(!window.is_dragging());
    assert_eq!(host.cursor_clip(), None);
}

#[test]
fn test_moves_without_left_button_are_ignored() {
    let (_, mut window) = loaded_window();
    let mut host = FixedHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));

    window.on_mouse_down(&mut host, MouseButton::Left, Vec2::new(0.0, 0.0));
    window.on_mouse_move(&mut host, None, Vec2::new(50.0, 50.0));
    window.on_mouse_move(&mut host, Some(MouseButton::Right), Vec2::new(50.0, 50.0));
    assert_eq!(window.position(), Vec2::new(100.0, 100.0));
}

#[test]
fn test_non_left_press_does_not_start_drag() {
    let (_, mut window) = loaded_window();
    let mut host = FixedHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));

    window.on_mouse_down(&mut host, MouseButton::Right, Vec2::new(4.0, 4.0));
    assert!(!window.is_dragging());
    assert_eq!(host.cursor_clip(), None);
}
