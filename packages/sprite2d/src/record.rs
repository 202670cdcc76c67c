//! Device implementation that records draw commands instead of rendering.

use crate::{
    device::{
        Device,
        SpriteImage,
    },
    transform::Transform2,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use anyhow::{bail, Result};
use vek::*;


/// Handle to an image "loaded" by a `RecordDevice`: the path it came from
/// and its declared pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordImage {
    pub path: PathBuf,
    pub size: Extent2<u32>,
}

impl SpriteImage for RecordImage {
    fn size(&self) -> Extent2<u32> {
        self.size
    }
}


/// One recorded device command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear(Rgba<f32>),
    BeginScene,
    EndScene,
    Present,
    SpriteBegin,
    SetTransform(Transform2),
    DrawSprite {
        image: RecordImage,
        src: Option<Rect<f32, f32>>,
        tint: Rgba<f32>,
    },
    SpriteEnd,
    DrawText {
        text: String,
        pos: Vec2<f32>,
        color: Rgba<f32>,
    },
}


/// Device that records every command issued to it, for tests and debugging.
///
/// Images are synthetic: each provided path maps to a declared pixel size,
/// and loading any other path fails.
#[derive(Debug, Default)]
pub struct RecordDevice {
    images: HashMap<PathBuf, Extent2<u32>>,
    pub commands: Vec<Command>,
}

impl RecordDevice {
    pub fn new() -> Self {
        Default::default()
    }

    /// Declare that `path` decodes to an image of `size` pixels.
    pub fn provide_image<P: Into<PathBuf>>(&mut self, path: P, size: Extent2<u32>) {
        self.images.insert(path.into(), size);
    }

    /// Drop all recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// The images drawn by sprite commands recorded so far, in draw order.
    pub fn drawn_images(&self) -> Vec<&RecordImage> {
        self.commands.iter()
            .filter_map(|command| match command {
                Command::DrawSprite { image, .. } => Some(image),
                _ => None,
            })
            .collect()
    }

    /// The text runs drawn so far, in draw order.
    pub fn drawn_texts(&self) -> Vec<&str> {
        self.commands.iter()
            .filter_map(|command| match command {
                Command::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Device for RecordDevice {
    type Image = RecordImage;

    fn load_image(&mut self, path: &Path) -> Result<RecordImage> {
        match self.images.get(path) {
            Some(&size) => Ok(RecordImage {
                path: path.to_owned(),
                size,
            }),
            None => bail!("no such image: {:?}", path),
        }
    }

    fn clear(&mut self, color: Rgba<f32>) {
        self.commands.push(Command::Clear(color));
    }

    fn begin_scene(&mut self) {
        self.commands.push(Command::BeginScene);
    }

    fn end_scene(&mut self) {
        self.commands.push(Command::EndScene);
    }

    fn present(&mut self) {
        self.commands.push(Command::Present);
    }

    fn sprite_begin(&mut self) {
        self.commands.push(Command::SpriteBegin);
    }

    fn sprite_set_transform(&mut self, transform: Transform2) {
        self.commands.push(Command::SetTransform(transform));
    }

    fn sprite_draw(
        &mut self,
        image: &RecordImage,
        src: Option<Rect<f32, f32>>,
        tint: Rgba<f32>,
    ) {
        self.commands.push(Command::DrawSprite {
            image: image.clone(),
            src,
            tint,
        });
    }

    fn sprite_end(&mut self) {
        self.commands.push(Command::SpriteEnd);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2<f32>, color: Rgba<f32>) {
        self.commands.push(Command::DrawText {
            text: text.to_owned(),
            pos,
            color,
        });
    }
}
