//! Software device: decodes image files with the `image` crate and
//! composites sprite draws into a CPU framebuffer.

use crate::{
    device::{
        Device,
        SpriteImage,
    },
    transform::Transform2,
};
use std::{
    path::Path,
    sync::Arc,
};
use anyhow::{Context, Result};
use tracing::*;
use vek::*;


/// 2D RGBA image held in memory.
///
/// Internally reference-counted.
#[derive(Debug, Clone)]
pub struct SoftImage(Arc<SoftImageInner>);

#[derive(Debug)]
struct SoftImageInner {
    size: Extent2<u32>,
    /// Row-major RGBA texels.
    pixels: Vec<[u8; 4]>,
}

impl SoftImage {
    fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        self.0.pixels[(y * self.0.size.w + x) as usize]
    }
}

impl SpriteImage for SoftImage {
    fn size(&self) -> Extent2<u32> {
        self.0.size
    }
}


/// Headless reference implementation of `Device`.
///
/// Sprite draws are composited by inverse-mapping each destination pixel
/// center through the current transform, with nearest sampling, tint
/// modulation, and source-alpha blending over the backbuffer. Bracket misuse
/// panics.
#[derive(Debug)]
pub struct SoftDevice {
    size: Extent2<u32>,
    back: Vec<[u8; 4]>,
    front: Vec<[u8; 4]>,
    frames_presented: u64,
    in_scene: bool,
    /// Current sprite transform, present only inside a sprite bracket.
    sprite: Option<Transform2>,
}

impl SoftDevice {
    /// New device with a `size`-pixel backbuffer, cleared to transparent
    /// black.
    pub fn new(size: Extent2<u32>) -> Self {
        let len = (size.w * size.h) as usize;
        SoftDevice {
            size,
            back: vec![[0; 4]; len],
            front: vec![[0; 4]; len],
            frames_presented: 0,
            in_scene: false,
            sprite: None,
        }
    }

    pub fn size(&self) -> Extent2<u32> {
        self.size
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Pixel of the last presented frame.
    pub fn front_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.size.w && y < self.size.h, "pixel out of bounds");
        self.front[(y * self.size.w + x) as usize]
    }

    /// The last presented frame, flattened to row-major RGBA bytes.
    pub fn front_bytes(&self) -> Vec<u8> {
        self.front.iter().flatten().copied().collect()
    }
}

fn color_to_bytes(color: Rgba<f32>) -> [u8; 4] {
    let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        quantize(color.r),
        quantize(color.g),
        quantize(color.b),
        quantize(color.a),
    ]
}

/// Source-over blend of a tinted texel onto a backbuffer pixel.
fn blend(dst: [u8; 4], texel: [u8; 4], tint: Rgba<f32>) -> [u8; 4] {
    let src = Rgba::new(
        texel[0] as f32 / 255.0 * tint.r,
        texel[1] as f32 / 255.0 * tint.g,
        texel[2] as f32 / 255.0 * tint.b,
        texel[3] as f32 / 255.0 * tint.a,
    );
    let dst = Rgba::new(
        dst[0] as f32 / 255.0,
        dst[1] as f32 / 255.0,
        dst[2] as f32 / 255.0,
        dst[3] as f32 / 255.0,
    );
    let a = src.a;
    color_to_bytes(Rgba::new(
        src.r * a + dst.r * (1.0 - a),
        src.g * a + dst.g * (1.0 - a),
        src.b * a + dst.b * (1.0 - a),
        a + dst.a * (1.0 - a),
    ))
}

impl Device for SoftDevice {
    type Image = SoftImage;

    fn load_image(&mut self, path: &Path) -> Result<SoftImage> {
        let image = image::open(path)
            .with_context(|| format!("decoding image file {:?}", path))?
            .into_rgba8();
        let size = Extent2::new(image.width(), image.height());
        let pixels = image.pixels().map(|pixel| pixel.0).collect();
        trace!("decoded {}x{} image from {:?}", size.w, size.h, path);
        Ok(SoftImage(Arc::new(SoftImageInner { size, pixels })))
    }

    fn clear(&mut self, color: Rgba<f32>) {
        let bytes = color_to_bytes(color);
        self.back.fill(bytes);
    }

    fn begin_scene(&mut self) {
        assert!(!self.in_scene, "begin_scene inside scene bracket");
        self.in_scene = true;
    }

    fn end_scene(&mut self) {
        assert!(self.in_scene, "end_scene outside scene bracket");
        assert!(self.sprite.is_none(), "end_scene inside sprite bracket");
        self.in_scene = false;
    }

    fn present(&mut self) {
        assert!(!self.in_scene, "present inside scene bracket");
        self.front.copy_from_slice(&self.back);
        self.frames_presented += 1;
    }

    fn sprite_begin(&mut self) {
        assert!(self.in_scene, "sprite_begin outside scene bracket");
        assert!(self.sprite.is_none(), "sprite_begin inside sprite bracket");
        self.sprite = Some(Transform2::identity());
    }

    fn sprite_set_transform(&mut self, transform: Transform2) {
        assert!(
            self.sprite.is_some(),
            "sprite_set_transform outside sprite bracket",
        );
        self.sprite = Some(transform);
    }

    fn sprite_draw(
        &mut self,
        image: &SoftImage,
        src: Option<Rect<f32, f32>>,
        tint: Rgba<f32>,
    ) {
        let transform = self.sprite
            .expect("sprite_draw outside sprite bracket");
        let inverse = match transform.inverse() {
            Some(inverse) => inverse,
            // degenerate transform, nothing visible
            None => return,
        };

        let image_size = image.size();
        let src = src.unwrap_or(Rect::new(
            0.0,
            0.0,
            image_size.w as f32,
            image_size.h as f32,
        ));

        // destination bounding box of the transformed quad, clamped to the
        // framebuffer
        let corners = [
            transform.apply([0.0, 0.0]),
            transform.apply([src.w, 0.0]),
            transform.apply([0.0, src.h]),
            transform.apply([src.w, src.h]),
        ];
        let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);
        let x0 = min_x.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(self.size.w);
        let y0 = min_y.floor().max(0.0) as u32;
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.size.h);

        for y in y0..y1 {
            for x in x0..x1 {
                // destination pixel center, mapped back into quad space
                let local = inverse.apply([x as f32 + 0.5, y as f32 + 0.5]);
                if local.x < 0.0 || local.y < 0.0
                    || local.x >= src.w || local.y >= src.h
                {
                    continue;
                }
                let sx = (src.x + local.x) as u32;
                let sy = (src.y + local.y) as u32;
                if sx >= image_size.w || sy >= image_size.h {
                    continue;
                }
                let texel = image.texel(sx, sy);
                let index = (y * self.size.w + x) as usize;
                self.back[index] = blend(self.back[index], texel, tint);
            }
        }
    }

    fn sprite_end(&mut self) {
        assert!(self.sprite.is_some(), "sprite_end outside sprite bracket");
        self.sprite = None;
    }

    fn draw_text(&mut self, text: &str, pos: Vec2<f32>, color: Rgba<f32>) {
        assert!(self.in_scene, "draw_text outside scene bracket");
        // no text facility in the software device; hosts with a real text
        // stack draw captions themselves
        let _ = color;
        trace!("caption {:?} at {},{} not rasterized", text, pos.x, pos.y);
    }
}


#[cfg(test)]
fn test_image(size: Extent2<u32>, texel: [u8; 4]) -> SoftImage {
    SoftImage(Arc::new(SoftImageInner {
        size,
        pixels: vec![texel; (size.w * size.h) as usize],
    }))
}

#[test]
fn test_clear_and_present() {
    let mut device = SoftDevice::new(Extent2::new(4, 4));
    device.clear(Rgba::new(1.0, 0.0, 0.0, 1.0));
    device.begin_scene();
    device.end_scene();
    device.present();

    assert_eq!(device.frames_presented(), 1);
    assert_eq!(device.front_pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(device.front_pixel(3, 3), [255, 0, 0, 255]);
}

#[test]
fn test_sprite_draw_at_translation() {
    let image = test_image(Extent2::new(2, 2), [0, 255, 0, 255]);

    let mut device = SoftDevice::new(Extent2::new(8, 8));
    device.clear(Rgba::black());
    device.begin_scene();
    device.sprite_begin();
    device.sprite_set_transform(Transform2::translate([3.0, 5.0]));
    device.sprite_draw(&image, None, Rgba::white());
    device.sprite_end();
    device.end_scene();
    device.present();

    assert_eq!(device.front_pixel(3, 5), [0, 255, 0, 255]);
    assert_eq!(device.front_pixel(4, 6), [0, 255, 0, 255]);
    assert_eq!(device.front_pixel(2, 5), [0, 0, 0, 255]);
    assert_eq!(device.front_pixel(5, 5), [0, 0, 0, 255]);
}

#[test]
fn test_sprite_draw_honors_source_rect() {
    // left column red, right column blue
    let image = SoftImage(Arc::new(SoftImageInner {
        size: Extent2::new(2, 1),
        pixels: vec![[255, 0, 0, 255], [0, 0, 255, 255]],
    }));

    let mut device = SoftDevice::new(Extent2::new(4, 4));
    device.clear(Rgba::black());
    device.begin_scene();
    device.sprite_begin();
    device.sprite_set_transform(Transform2::identity());
    device.sprite_draw(
        &image,
        Some(Rect::new(1.0, 0.0, 1.0, 1.0)),
        Rgba::white(),
    );
    device.sprite_end();
    device.end_scene();
    device.present();

    assert_eq!(device.front_pixel(0, 0), [0, 0, 255, 255]);
    assert_eq!(device.front_pixel(1, 0), [0, 0, 0, 255]);
}

#[test]
fn test_sprite_draw_blends_source_alpha() {
    let image = test_image(Extent2::new(1, 1), [255, 255, 255, 127]);

    let mut device = SoftDevice::new(Extent2::new(1, 1));
    device.clear(Rgba::black());
    device.begin_scene();
    device.sprite_begin();
    device.sprite_set_transform(Transform2::identity());
    device.sprite_draw(&image, None, Rgba::white());
    device.sprite_end();
    device.end_scene();
    device.present();

    let [r, g, b, a] = device.front_pixel(0, 0);
    assert!(r > 120 && r < 135, "got {}", r);
    assert_eq!(r, g);
    assert_eq!(g, b);
    assert_eq!(a, 255);
}

#[test]
#[should_panic(expected = "sprite_draw outside sprite bracket")]
fn test_sprite_draw_outside_bracket_panics() {
    let image = test_image(Extent2::new(1, 1), [0, 0, 0, 255]);
    let mut device = SoftDevice::new(Extent2::new(1, 1));
    device.begin_scene();
    device.sprite_draw(&image, None, Rgba::white());
}
