//! Base overlay control: a positioned rectangle whose only visual output is
//! one sprite-drawn texture.

use crate::{
    frame::Control,
    host::NativePaint,
};
use sprite2d::{
    device::Device,
    sprite::SpriteBatch,
    texture::Texture,
};
use std::path::Path;
use anyhow::Result;
use tracing::*;
use vek::*;


/// One host-positioned rectangle bound to one texture and one sprite batch.
///
/// The control sizes itself to whatever image it loads, keeps the texture
/// translation glued to its position, and draws nothing natively.
pub struct OverlayControl<D: Device> {
    position: Vec2<f32>,
    size: Extent2<f32>,
    texture: Texture<D::Image>,
    sprite: SpriteBatch,
}

impl<D: Device> OverlayControl<D> {
    /// New control at the origin with zero size and no image bound.
    pub fn new() -> Self {
        OverlayControl {
            position: Vec2::zero(),
            size: Extent2::new(0.0, 0.0),
            texture: Texture::new(),
            sprite: SpriteBatch::new(),
        }
    }

    pub fn position(&self) -> Vec2<f32> {
        self.position
    }

    pub fn size(&self) -> Extent2<f32> {
        self.size
    }

    /// Screen rectangle currently covered by the control.
    pub fn bounds(&self) -> Rect<f32, f32> {
        Rect::new(self.position.x, self.position.y, self.size.w, self.size.h)
    }

    /// The control's texture (the drawn quad's parameters).
    pub fn texture(&self) -> &Texture<D::Image> {
        &self.texture
    }

    /// Move the control. The texture translation is recomputed so the drawn
    /// quad stays glued to the control's host coordinates.
    pub fn set_position<V: Into<Vec2<f32>>>(&mut self, position: V) {
        self.position = position.into();
        self.texture.translation = self.position;
    }

    /// Load the control's texture from an image file.
    ///
    /// On success the control takes the decoded image's native pixel
    /// dimensions, identity scaling, and a translation matching its current
    /// position. On failure the error is returned and all prior state is
    /// left untouched.
    pub fn load_from_file(&mut self, device: &mut D, path: &Path) -> Result<()> {
        let image_size = self.texture.load(device, path)?;
        self.size = Extent2::new(image_size.w as f32, image_size.h as f32);
        self.texture.scaling = Vec2::new(1.0, 1.0);
        self.texture.translation = self.position;
        debug!(
            "control took {}x{} from {:?}",
            image_size.w, image_size.h, path,
        );
        Ok(())
    }

    /// Draw the control's texture. Returns false, without touching the
    /// device, if no image is bound.
    pub fn render(&mut self, device: &mut D) -> bool {
        if self.texture.image().is_none() {
            return false;
        }
        self.sprite.draw_texture(device, &self.texture);
        true
    }

    /// Native paint suppression: the sprite draw is the only visual output.
    pub fn native_paint(&self) -> NativePaint {
        NativePaint::Suppressed
    }

    /// Release the control's texture. Idempotent.
    pub fn dispose(&mut self) {
        self.texture.dispose();
    }
}

impl<D: Device> Control<D> for OverlayControl<D> {
    fn render(&mut self, device: &mut D) -> bool {
        OverlayControl::render(self, device)
    }

    fn dispose(&mut self) {
        OverlayControl::dispose(self)
    }
}


#[test]
fn test_render_false_until_loaded() {
    use sprite2d::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("face.png", Extent2::new(32, 16));

    let mut control = OverlayControl::new();
    assert!(!control.render(&mut device));
    assert!(device.commands.is_empty());

    control.load_from_file(&mut device, "face.png".as_ref()).unwrap();
    assert!(control.render(&mut device));
    assert_eq!(device.drawn_images().len(), 1);
}

#[test]
fn test_load_sizes_control_to_image() {
    use sprite2d::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("face.png", Extent2::new(32, 16));

    let mut control = OverlayControl::new();
    control.set_position([7.0, 9.0]);
    control.load_from_file(&mut device, "face.png".as_ref()).unwrap();

    assert_eq!(control.size(), Extent2::new(32.0, 16.0));
    assert_eq!(control.texture().scaling, Vec2::new(1.0, 1.0));
    assert_eq!(control.texture().translation, Vec2::new(7.0, 9.0));
}

#[test]
fn test_failed_load_leaves_prior_state() {
    use sprite2d::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("face.png", Extent2::new(32, 16));

    let mut control = OverlayControl::new();
    control.load_from_file(&mut device, "face.png".as_ref()).unwrap();

    assert!(control.load_from_file(&mut device, "gone.png".as_ref()).is_err());
    assert_eq!(control.size(), Extent2::new(32.0, 16.0));
    assert_eq!(
        control.texture().size(),
        Some(Extent2::new(32, 16)),
    );
    assert!(control.render(&mut device));
}

#[test]
fn test_move_updates_translation_immediately() {
    use sprite2d::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("face.png", Extent2::new(8, 8));

    let mut control = OverlayControl::new();
    control.load_from_file(&mut device, "face.png".as_ref()).unwrap();

    control.set_position([120.0, 44.0]);
    assert_eq!(control.texture().translation, Vec2::new(120.0, 44.0));

    control.set_position([0.0, -3.0]);
    assert_eq!(control.texture().translation, Vec2::new(0.0, -3.0));
}
