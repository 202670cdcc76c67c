//! Sprite batch: draws a texture as one transformed quad.

use crate::{
    device::Device,
    texture::Texture,
    transform::Transform2,
};
use vek::*;


/// Wraps the device's sprite facility. Each `draw_texture` call is one
/// complete begin/end sprite bracket.
#[derive(Debug, Default)]
pub struct SpriteBatch;

impl SpriteBatch {
    pub fn new() -> Self {
        SpriteBatch
    }

    /// Draw `texture` under the transform built from its parameters, with a
    /// fixed opaque white modulation tint.
    ///
    /// Does nothing if the texture has no bound image; callers that need to
    /// know whether a draw happened check the texture first.
    pub fn draw_texture<D: Device>(
        &mut self,
        device: &mut D,
        texture: &Texture<D::Image>,
    ) {
        let image = match texture.image() {
            Some(image) => image,
            None => return,
        };

        let transform = Transform2::sprite(
            texture.scaling,
            texture.rotation_center,
            texture.rotation,
            texture.translation,
        );

        device.sprite_begin();
        device.sprite_set_transform(transform);
        device.sprite_draw(image, texture.source_rect, Rgba::white());
        device.sprite_end();
    }
}


#[test]
fn test_draw_texture_issues_one_bracket() {
    use crate::record::{Command, RecordDevice};

    let mut device = RecordDevice::new();
    device.provide_image("a.png", Extent2::new(16, 16));

    let mut texture = Texture::new();
    texture.load(&mut device, "a.png".as_ref()).unwrap();
    texture.translation = Vec2::new(5.0, 9.0);
    device.clear_commands();

    SpriteBatch::new().draw_texture(&mut device, &texture);

    assert_eq!(device.commands.len(), 4);
    assert_eq!(device.commands[0], Command::SpriteBegin);
    assert_eq!(
        device.commands[1],
        Command::SetTransform(Transform2::translate([5.0, 9.0])),
    );
    assert!(matches!(
        device.commands[2],
        Command::DrawSprite { tint, .. } if tint == Rgba::white()
    ));
    assert_eq!(device.commands[3], Command::SpriteEnd);
}

#[test]
fn test_draw_texture_without_image_touches_nothing() {
    use crate::record::RecordDevice;

    let mut device = RecordDevice::new();
    let texture = Texture::<crate::record::RecordImage>::new();

    SpriteBatch::new().draw_texture(&mut device, &texture);
    assert!(device.commands.is_empty());
}
