//! The graphics-device seam consumed by the sprite layer.

use crate::transform::Transform2;
use std::path::Path;
use anyhow::Result;
use vek::*;


/// Owned handle to a device-resident image. Cloning is cheap and shares the
/// underlying resource; the resource is released when the last handle drops.
pub trait SpriteImage: Clone {
    /// Image size in pixels.
    fn size(&self) -> Extent2<u32>;
}


/// A host graphics device: loads images from files and draws transformed
/// textured quads within a begin/end scene bracket.
///
/// One frame is `clear`, `begin_scene`, any number of sprite brackets,
/// `end_scene`, `present`. One sprite bracket is `sprite_begin`,
/// `sprite_set_transform`, one or more `sprite_draw`s, `sprite_end`.
/// Violating that discipline is a programming error, not a recoverable
/// condition.
pub trait Device {
    type Image: SpriteImage;

    /// Decode an image file into a device-resident image.
    fn load_image(&mut self, path: &Path) -> Result<Self::Image>;

    /// Fill the backbuffer with `color`.
    fn clear(&mut self, color: Rgba<f32>);

    fn begin_scene(&mut self);

    fn end_scene(&mut self);

    /// Publish the finished backbuffer.
    fn present(&mut self);

    fn sprite_begin(&mut self);

    /// Set the transform applied to subsequent draws in this sprite bracket.
    fn sprite_set_transform(&mut self, transform: Transform2);

    /// Draw `image`, or the `src` sub-rectangle of it, under the current
    /// sprite transform, modulated by `tint`.
    fn sprite_draw(
        &mut self,
        image: &Self::Image,
        src: Option<Rect<f32, f32>>,
        tint: Rgba<f32>,
    );

    fn sprite_end(&mut self);

    /// Draw a single run of caption text at `pos`. No layout is performed;
    /// this is the host's text facility, not a text engine.
    fn draw_text(&mut self, text: &str, pos: Vec2<f32>, color: Rgba<f32>);
}
