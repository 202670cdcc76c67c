//! Per-frame scene driver.

use sprite2d::device::Device;
use vek::*;


/// Polymorphic per-frame behavior of an overlay control, as seen by the
/// host's frame loop.
pub trait Control<D: Device> {
    /// Draw the control. Returns whether anything was drawn.
    fn render(&mut self, device: &mut D) -> bool;

    /// Release the control's device resources. Idempotent; called by the
    /// host exactly once at teardown, but safe to repeat.
    fn dispose(&mut self);
}


/// Drive one frame tick: clear the backbuffer, bracket the scene, render
/// each control in order, present.
pub fn run_frame<D: Device>(
    device: &mut D,
    clear_color: Rgba<f32>,
    controls: &mut [&mut dyn Control<D>],
) {
    device.clear(clear_color);
    device.begin_scene();
    for control in controls.iter_mut() {
        control.render(device);
    }
    device.end_scene();
    device.present();
}


#[test]
fn test_run_frame_brackets_the_scene() {
    use crate::control::OverlayControl;
    use sprite2d::record::{Command, RecordDevice};

    let mut device = RecordDevice::new();
    device.provide_image("face.png", Extent2::new(4, 4));

    let mut control = OverlayControl::new();
    control.load_from_file(&mut device, "face.png".as_ref()).unwrap();
    device.clear_commands();

    let clear_color = Rgba::new(0.1, 0.2, 0.3, 1.0);
    run_frame(&mut device, clear_color, &mut [&mut control]);

    assert_eq!(device.commands.first(), Some(&Command::Clear(clear_color)));
    assert_eq!(device.commands.get(1), Some(&Command::BeginScene));
    assert_eq!(device.drawn_images().len(), 1);
    let len = device.commands.len();
    assert_eq!(device.commands[len - 2], Command::EndScene);
    assert_eq!(device.commands[len - 1], Command::Present);
}
