// src/render/framebuffer.rs

use std::path::Path;

use image::RgbaImage;

use crate::error::{CasterError, Result};

pub type Rgba = [u8; 4];

/// Row-major RGBA8 frame the renderer draws into.
pub struct FrameBuffer {
    pixels: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            pixels: vec![[0, 0, 0, 255]; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Out-of-range writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Bresenham line between two points, rounded to the pixel grid.
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba) {
        let (mut x, mut y) = (x0.round() as i64, y0.round() as i64);
        let (x_end, y_end) = (x1.round() as i64, y1.round() as i64);
        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let sx = if x < x_end { 1 } else { -1 };
        let sy = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        let r = radius.ceil() as i64;
        let (ix, iy) = (cx.round() as i64, cy.round() as i64);
        for y in -r..=r {
            for x in -r..=r {
                if ((x * x + y * y) as f64) <= radius * radius {
                    self.set_pixel(ix + x, iy + y, color);
                }
            }
        }
    }

    pub fn to_image(&self) -> RgbaImage {
        let raw: Vec<u8> = self.pixels.iter().flatten().copied().collect();
        RgbaImage::from_raw(self.width as u32, self.height as u32, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width as u32, self.height as u32))
    }

    /// Writes the frame as an image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_image().save(path).map_err(|source| CasterError::Frame {
            path: path.to_path_buf(),
            source,
        })
    }
}
