
#[macro_use]
extern crate tracing;


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
    env,
    fs,
    fs::File,
    panic,
    path::{Path, PathBuf},
    sync::Arc,
};
use anyhow::{Context, Result};
use backtrace::Backtrace;
use image::RgbaImage;
use tracing_subscriber::{
    prelude::*,
    Registry,
    EnvFilter,
};
use vek::*;


fn main() {
    // initialize and install logging system
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty();

    let log_file = File::create("log")
        .expect("unable to create log file");
    let log_file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(stdout_log)
        .with(log_file_log);
    tracing::subscriber::set_global_default(subscriber)
        .expect("unable to install log subscriber");
    info!("starting demo");

    // make panic messages and backtrace go through logging system
    panic::set_hook(Box::new(|info| {
        error!("{}", info);
        if env::var("RUST_BACKTRACE").map(|val| val == "1").unwrap_or(true) {
            error!("{:?}", Backtrace::new());
        }
    }));

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Write a flat-color image with a one pixel border, for use as a control
/// face. The demo synthesizes its assets so it runs with no files checked
/// in.
fn write_flat_image(
    path: &Path,
    size: Extent2<u32>,
    fill: [u8; 4],
    border: [u8; 4],
) -> Result<()> {
    let mut img = RgbaImage::from_pixel(size.w, size.h, image::Rgba(fill));
    for x in 0..size.w {
        img.put_pixel(x, 0, image::Rgba(border));
        img.put_pixel(x, size.h - 1, image::Rgba(border));
    }
    for y in 0..size.h {
        img.put_pixel(0, y, image::Rgba(border));
        img.put_pixel(size.w - 1, y, image::Rgba(border));
    }
    img.save(path)
        .with_context(|| format!("writing asset {:?}", path))?;
    Ok(())
}

fn frame(
    device: &mut SoftDevice,
    window: &mut OverlayWindow<SoftDevice>,
    button: &mut Button<SoftDevice>,
) {
    // dark slate blue backdrop
    let background = Rgba::new(0.28, 0.24, 0.55, 1.0);
    run_frame(device, background, &mut [
        window as &mut dyn Control<SoftDevice>,
        button,
    ]);
}

fn run() -> Result<()> {
    let out_path = env::args().nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demo-frame.png"));

    let assets_dir = env::temp_dir().join("overlay-demo-assets");
    fs::create_dir_all(&assets_dir)
        .with_context(|| format!("creating {:?}", assets_dir))?;

    let mut device = SoftDevice::new(Extent2::new(1280, 720));
    let mut host = FixedHost::new(Rect::new(0.0, 0.0, 1280.0, 720.0));

    let window_face = assets_dir.join("window256.png");
    write_flat_image(
        &window_face,
        Extent2::new(256, 256),
        [58, 58, 70, 230],
        [210, 210, 220, 255],
    )?;

    let mut window = OverlayWindow::new();
    window.load_from_file(&mut device, &window_face)?;
    window.set_position([100.0, 100.0]);

    let button_states = [
        (ButtonState::OffNone, "button_off_none.png", [90, 90, 110, 255]),
        (ButtonState::OffFocus, "button_off_focus.png", [98, 98, 120, 255]),
        (ButtonState::OffHover, "button_off_hover.png", [120, 120, 150, 255]),
        (ButtonState::OffDown, "button_off_down.png", [70, 70, 90, 255]),
        (ButtonState::OnNone, "button_on_none.png", [70, 130, 80, 255]),
        (ButtonState::OnFocus, "button_on_focus.png", [80, 140, 90, 255]),
        (ButtonState::OnHover, "button_on_hover.png", [100, 160, 110, 255]),
        (ButtonState::OnDown, "button_on_down.png", [50, 100, 60, 255]),
    ];

    let mut button = Button::new();
    button.caption = String::from("Toggle");
    button.set_position([520.0, 330.0]);
    for &(state, name, fill) in &button_states {
        let path = assets_dir.join(name);
        write_flat_image(&path, Extent2::new(128, 48), fill, [230, 230, 240, 255])?;
        button.set_texture(&mut device, state, &path)?;
    }

    frame(&mut device, &mut window, &mut button);

    // drag the window down-right by (50, 40)
    window.on_mouse_down(&mut host, MouseButton::Left, Vec2::new(40.0, 20.0));
    window.on_mouse_move(&mut host, Some(MouseButton::Left), Vec2::new(90.0, 60.0));
    window.on_mouse_up(&mut host, MouseButton::Left, Vec2::new(90.0, 60.0));
    frame(&mut device, &mut window, &mut button);
    info!("window now at {:?}", window.position());

    // hover, press, and toggle the button
    button.on_mouse_enter();
    frame(&mut device, &mut window, &mut button);
    button.on_mouse_down(MouseButton::Left, Vec2::new(30.0, 20.0));
    frame(&mut device, &mut window, &mut button);
    button.on_mouse_up(MouseButton::Left, Vec2::new(30.0, 20.0));
    frame(&mut device, &mut window, &mut button);
    info!(
        "button selected = {}, state = {:?}",
        button.selected(), button.state(),
    );

    // dump the final frame
    let size = device.size();
    let dump = RgbaImage::from_raw(size.w, size.h, device.front_bytes())
        .context("framebuffer size mismatch")?;
    dump.save(&out_path)
        .with_context(|| format!("writing {:?}", out_path))?;
    info!("wrote {:?} after {} frames", out_path, device.frames_presented());

    button.dispose();
    window.dispose();
    Ok(())
}
