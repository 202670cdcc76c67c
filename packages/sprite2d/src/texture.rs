//! Texture resource: one device-resident image plus its 2D draw parameters.

use crate::device::{
    Device,
    SpriteImage,
};
use std::path::Path;
use anyhow::{Context, Result};
use tracing::*;
use vek::*;


/// One device-resident image and the parameters a sprite draw of it uses.
///
/// Created empty. The image handle is owned exclusively and released exactly
/// once: replaced by a successful `load`, taken by `dispose`, or dropped with
/// the texture.
#[derive(Debug, Clone)]
pub struct Texture<I> {
    image: Option<I>,
    pub scaling: Vec2<f32>,
    pub rotation: f32,
    pub rotation_center: Vec2<f32>,
    pub translation: Vec2<f32>,
    pub source_rect: Option<Rect<f32, f32>>,
}

impl<I: SpriteImage> Texture<I> {
    /// New texture with no image bound and identity draw parameters.
    pub fn new() -> Self {
        Texture {
            image: None,
            scaling: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            rotation_center: Vec2::zero(),
            translation: Vec2::zero(),
            source_rect: None,
        }
    }

    /// Load a new image from `path`, replacing any previously bound image,
    /// and return its pixel dimensions.
    ///
    /// The new image is loaded before the old handle is released, so on
    /// failure the previously bound image remains bound and untouched.
    pub fn load<D>(&mut self, device: &mut D, path: &Path) -> Result<Extent2<u32>>
    where
        D: Device<Image = I>,
    {
        let image = device.load_image(path)
            .with_context(|| format!("loading texture from {:?}", path))?;
        let size = image.size();
        self.image = Some(image);
        trace!("loaded {}x{} texture from {:?}", size.w, size.h, path);
        Ok(size)
    }

    /// The bound image, if any.
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    /// Pixel dimensions of the bound image, if any.
    pub fn size(&self) -> Option<Extent2<u32>> {
        self.image.as_ref().map(|image| image.size())
    }

    /// Release the bound image. Idempotent.
    pub fn dispose(&mut self) {
        self.image = None;
    }
}


#[test]
fn test_load_binds_image_and_returns_size() {
    use crate::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("a.png", Extent2::new(64, 32));

    let mut texture = Texture::new();
    assert!(texture.image().is_none());

    let size = texture.load(&mut device, "a.png".as_ref()).unwrap();
    assert_eq!(size, Extent2::new(64, 32));
    assert_eq!(texture.size(), Some(Extent2::new(64, 32)));
}

#[test]
fn test_failed_load_keeps_prior_image() {
    use crate::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("a.png", Extent2::new(64, 32));

    let mut texture = Texture::new();
    texture.load(&mut device, "a.png".as_ref()).unwrap();

    assert!(texture.load(&mut device, "missing.png".as_ref()).is_err());
    assert_eq!(texture.size(), Some(Extent2::new(64, 32)));
}

#[test]
fn test_dispose_is_idempotent() {
    use crate::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("a.png", Extent2::new(8, 8));

    let mut texture = Texture::new();
    texture.load(&mut device, "a.png".as_ref()).unwrap();

    texture.dispose();
    assert!(texture.image().is_none());
    texture.dispose();
    assert!(texture.image().is_none());
}
