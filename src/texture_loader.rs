use std::fs;
use std::io::Cursor;
use std::path::Path;
use anyhow::{anyhow, bail, Context, Result};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};

use crate::constants::IMAGE_EXTENSIONS;

/// Turns an image reference into something drawable.
///
/// A failed resolution is final for the caller: the tile is hidden, never
/// retried and never replaced with a stand-in image.
pub trait ImageSource {
    type Handle;

    fn resolve(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, reference: &str) -> Result<Self::Handle>;
}

/// Loads references as local image files into GPU textures.
#[derive(Default)]
pub struct TextureSource;

impl ImageSource for TextureSource {
    type Handle = Texture2D;

    fn resolve(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, reference: &str) -> Result<Texture2D> {
        load_texture_with_exif_rotation(rl, thread, Path::new(reference))
    }
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// EXIF orientation, only read from JPEG containers. 1 when absent.
fn read_orientation(file_bytes: &[u8]) -> Result<u16> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(file_bytes))
        .context("no readable EXIF block")?;
    let orientation = match exif.get_field(Tag::Orientation, In::PRIMARY) {
        Some(field) => match &field.value {
            Value::Short(values) => values.first().copied().unwrap_or(1),
            _ => 1,
        },
        None => 1,
    };
    Ok(orientation)
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    if !has_image_extension(image_path) {
        bail!("unsupported image type: {}", image_path.display());
    }

    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read {}", image_path.display()))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(&file_bytes).unwrap_or_else(|e| {
            tracing::debug!(path = %image_path.display(), error = %e, "ignoring EXIF orientation");
            1
        })
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &file_bytes)
        .map_err(|e| anyhow!("failed to decode {}: {}", image_path.display(), e))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are drawn as stored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to upload texture for {}: {}", image_path.display(), e))?;

    Ok(texture)
}
