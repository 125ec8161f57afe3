// src/render/texture.rs

use std::path::Path;

use log::info;

use crate::error::{CasterError, Result};
use crate::render::framebuffer::Rgba;

/// A decoded wall texture, sampled by integer coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Texture {
    /// Returns `None` unless `pixels` holds exactly `width * height` non-zero-sized entries.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<Rgba>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Texture {
            width,
            height,
            pixels,
        })
    }

    #[cfg(test)]
    pub(crate) fn solid(width: u32, height: u32, color: Rgba) -> Self {
        Texture {
            width: width.max(1),
            height: height.max(1),
            pixels: vec![color; (width.max(1) * height.max(1)) as usize],
        }
    }

    /// Decodes any format the `image` crate understands.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| CasterError::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();

        let texture = Texture::from_rgba(width, height, pixels).ok_or_else(|| {
            CasterError::EmptyTexture {
                path: path.to_path_buf(),
            }
        })?;
        info!("Loaded texture {:?} ({}x{})", path, width, height);
        Ok(texture)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coordinates are clamped into the texture.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Rgba {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}
