//! End-to-end scenarios against the software device: real image files,
//! scripted mouse traffic, pixel-level assertions on presented frames.

use overlay::{
    run_frame,
    Button,
    ButtonState,
    Control,
    FixedHost,
    MouseButton,
    OverlayWindow,
};
use sprite2d::soft::SoftDevice;
use std::{
    fs,
    path::{Path, PathBuf},
};
use image::RgbaImage;
use vek::*;


fn asset_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("overlay-scenario-{}-{}", std::process::id(), test));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_flat(dir: &Path, name: &str, size: Extent2<u32>, fill: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(size.w, size.h, image::Rgba(fill))
        .save(&path)
        .unwrap();
    path
}

const STATE_FILLS: [(ButtonState, &str, [u8; 4]); 8] = [
    (ButtonState::OffNone, "off_none.png", [10, 0, 0, 255]),
    (ButtonState::OffFocus, "off_focus.png", [20, 0, 0, 255]),
    (ButtonState::OffHover, "off_hover.png", [30, 0, 0, 255]),
    (ButtonState::OffDown, "off_down.png", [40, 0, 0, 255]),
    (ButtonState::OnNone, "on_none.png", [50, 0, 0, 255]),
    (ButtonState::OnFocus, "on_focus.png", [60, 0, 0, 255]),
    (ButtonState::OnHover, "on_hover.png", [70, 0, 0, 255]),
    (ButtonState::OnDown, "on_down.png", [80, 0, 0, 255]),
];

fn eight_state_button(
    dir: &Path,
    device: &mut SoftDevice,
) -> Button<SoftDevice> {
    let mut button = Button::new();
    button.set_position([200.0, 100.0]);
    for &(state, name, fill) in &STATE_FILLS {
        let path = write_flat(dir, name, Extent2::new(64, 24), fill);
        button.set_texture(device, state, &path).unwrap();
    }
    button
}

fn fill_for(state: ButtonState) -> [u8; 4] {
    STATE_FILLS.iter()
        .find(|&&(s, _, _)| s == state)
        .map(|&(_, _, fill)| fill)
        .unwrap()
}

/// Pixel inside the button after a fresh frame.
fn button_pixel(device: &mut SoftDevice, button: &mut Button<SoftDevice>) -> [u8; 4] {
    run_frame(device, Rgba::black(), &mut [button as &mut dyn Control<_>]);
    device.front_pixel(210, 110)
}

#[test]
fn end_to_end_toggle_scenario() {
    let dir = asset_dir("toggle");
    let mut device = SoftDevice::new(Extent2::new(640, 360));
    let mut button = eight_state_button(&dir, &mut device);

    // initial state renders the unselected resting slot
    assert_eq!(button.state(), ButtonState::OffNone);
    assert!(!button.selected());
    assert_eq!(
        button_pixel(&mut device, &mut button),
        fill_for(ButtonState::OffNone),
    );

    // enter hovers on the unselected side
    button.on_mouse_enter();
    assert_eq!(button.state(), ButtonState::OffHover);
    assert_eq!(
        button_pixel(&mut device, &mut button),
        fill_for(ButtonState::OffHover),
    );

    // press shows the down face
    button.on_mouse_down(MouseButton::Left, Vec2::new(10.0, 10.0));
    assert_eq!(button.state(), ButtonState::OffDown);
    assert_eq!(
        button_pixel(&mut device, &mut button),
        fill_for(ButtonState::OffDown),
    );

    // release flips the selected flag and rests on the selected side
    button.on_mouse_up(MouseButton::Left, Vec2::new(10.0, 10.0));
    assert!(button.selected());
    assert_eq!(button.state(), ButtonState::OnNone);
    assert_eq!(
        button_pixel(&mut device, &mut button),
        fill_for(ButtonState::OnNone),
    );
}

#[test]
fn dragged_window_renders_at_new_position() {
    let dir = asset_dir("drag");
    let mut device = SoftDevice::new(Extent2::new(640, 360));
    let mut host = FixedHost::new(Rect::new(0.0, 0.0, 640.0, 360.0));

    let face = write_flat(&dir, "face.png", Extent2::new(100, 50), [0, 200, 0, 255]);
    let mut window = OverlayWindow::new();
    window.load_from_file(&mut device, &face).unwrap();
    window.set_position([50.0, 50.0]);
    assert_eq!(window.size(), Extent2::new(100.0, 50.0));

    run_frame(
        &mut device,
        Rgba::black(),
        &mut [&mut window as &mut dyn Control<_>],
    );
    assert_eq!(device.front_pixel(55, 55), [0, 200, 0, 255]);
    assert_eq!(device.front_pixel(155, 55), [0, 0, 0, 255]);

    // drag by (30, 20)
    window.on_mouse_down(&mut host, MouseButton::Left, Vec2::new(5.0, 5.0));
    window.on_mouse_move(&mut host, Some(MouseButton::Left), Vec2::new(35.0, 25.0));
    window.on_mouse_up(&mut host, MouseButton::Left, Vec2::new(35.0, 25.0));
    assert_eq!(window.position(), Vec2::new(80.0, 70.0));
    assert_eq!(host.cursor_clip(), None);

    run_frame(
        &mut device,
        Rgba::black(),
        &mut [&mut window as &mut dyn Control<_>],
    );
    assert_eq!(device.front_pixel(55, 55), [0, 0, 0, 255]);
    assert_eq!(device.front_pixel(85, 75), [0, 200, 0, 255]);
}

#[test]
fn disposed_controls_render_nothing_and_redispose_safely() {
    let dir = asset_dir("dispose");
    let mut device = SoftDevice::new(Extent2::new(640, 360));
    let mut button = eight_state_button(&dir, &mut device);

    let face = write_flat(&dir, "face.png", Extent2::new(32, 32), [9, 9, 9, 255]);
    let mut window = OverlayWindow::new();
    window.load_from_file(&mut device, &face).unwrap();

    button.dispose();
    window.dispose();
    button.dispose();
    window.dispose();

    assert!(window.texture().image().is_none());
    run_frame(
        &mut device,
        Rgba::black(),
        &mut [
            &mut window as &mut dyn Control<_>,
            &mut button,
        ],
    );
    // nothing but the clear color anywhere near the controls
    assert_eq!(device.front_pixel(210, 110), [0, 0, 0, 255]);
    assert_eq!(device.front_pixel(5, 5), [0, 0, 0, 255]);
}
