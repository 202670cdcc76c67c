//! 2D sprite layer: affine transform math, the graphics-device seam, the
//! texture resource, and the sprite batch that draws textures as transformed
//! quads inside a begin/end scene bracket.

pub mod transform;
pub mod device;
pub mod texture;
pub mod sprite;
pub mod soft;
pub mod record;


pub use crate::{
    transform::Transform2,
    device::{
        Device,
        SpriteImage,
    },
    texture::Texture,
    sprite::SpriteBatch,
};
