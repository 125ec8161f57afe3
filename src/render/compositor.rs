// src/render/compositor.rs

use crate::render::framebuffer::{FrameBuffer, Rgba};
use crate::render::lighting::Lighting;
use crate::render::raycaster::{ColumnResult, WallHit};
use crate::render::texture::Texture;

/// The vertical strip a wall hit occupies on screen, and how to texture it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSlice {
    /// Unclamped projected height, `screen_height / corrected_distance`.
    pub line_height: i64,
    /// First and last scanline drawn, both inclusive and on screen.
    pub draw_start: usize,
    pub draw_end: usize,
    /// Texture column.
    pub tex_u: u32,
    /// Texture row at `draw_start`, and rows advanced per scanline.
    pub tex_v: f64,
    pub tex_step: f64,
    /// Light factor in `[0, 1]`.
    pub shade: f64,
}

/// Turns wall hits into [`WallSlice`]s for a given screen height and texture size.
#[derive(Debug, Clone, Copy)]
pub struct SliceProjector {
    pub screen_height: usize,
    pub texture_width: u32,
    pub texture_height: u32,
    /// World distance along a wall covered by one copy of the texture.
    pub texture_repeat: f64,
    pub lighting: Lighting,
}

impl SliceProjector {
    /// `None` when the wall is too far away to cover a single scanline.
    pub fn project(&self, hit: &WallHit) -> Option<WallSlice> {
        let height = self.screen_height as i64;
        if height == 0 {
            return None;
        }

        let line_height = (height as f64 / hit.corrected_distance) as i64;
        if line_height <= 0 {
            return None;
        }

        let half = height / 2;
        let top = half - line_height / 2;
        let draw_start = top.clamp(0, height - 1);
        let draw_end = (half + line_height / 2).clamp(0, height - 1);

        // Slices taller than the screen are cut from the texture, not squashed.
        let tex_step = self.texture_height as f64 / line_height as f64;
        let tex_v = (draw_start - top) as f64 * tex_step;

        Some(WallSlice {
            line_height,
            draw_start: draw_start as usize,
            draw_end: draw_end as usize,
            tex_u: self.texture_column(hit),
            tex_v,
            tex_step,
            shade: self.lighting.shade(hit.corrected_distance),
        })
    }

    /// Projects the hit onto the wall, wraps by the repeat distance, scales to pixels.
    fn texture_column(&self, hit: &WallHit) -> u32 {
        let along = (hit.point - hit.segment.start).dot(&hit.segment.unit_direction());
        let repeat = if self.texture_repeat > 0.0 {
            self.texture_repeat
        } else {
            1.0
        };
        let wrapped = along.rem_euclid(repeat) / repeat;
        ((wrapped * self.texture_width as f64) as u32).min(self.texture_width.saturating_sub(1))
    }
}

/// Draws shaded, tinted texture strips into the frame. Keeps no state between columns.
///
/// The shade acts as coverage: a texel at shade `s` is blended as `s` parts wall
/// over `1 - s` parts background, so distant walls fade into the background colour.
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    pub tint: [u8; 3],
    pub background: Rgba,
}

impl Compositor {
    pub fn new(tint: [u8; 3], background: Rgba) -> Self {
        Compositor { tint, background }
    }

    /// Draws every column that hit a wall; misses leave the background alone.
    pub fn composite(&self, frame: &mut FrameBuffer, columns: &[Option<ColumnResult>], texture: &Texture) {
        for (x, column) in columns.iter().enumerate() {
            if let Some(column) = column {
                self.draw_column(frame, x, &column.slice, texture);
            }
        }
    }

    pub fn draw_column(&self, frame: &mut FrameBuffer, x: usize, slice: &WallSlice, texture: &Texture) {
        for y in slice.draw_start..=slice.draw_end {
            let v = slice.tex_v + (y - slice.draw_start) as f64 * slice.tex_step;
            let texel = texture.sample(slice.tex_u, v as u32);
            frame.set_pixel(x as i64, y as i64, self.shade_texel(texel, slice.shade));
        }
    }

    fn shade_texel(&self, texel: Rgba, shade: f64) -> Rgba {
        let shade = shade.clamp(0.0, 1.0);
        let channel = |value: u8, tint: u8, background: u8| -> u8 {
            let wall = value as f64 * (tint as f64 / 255.0);
            (wall * shade + background as f64 * (1.0 - shade))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        [
            channel(texel[0], self.tint[0], self.background[0]),
            channel(texel[1], self.tint[1], self.background[1]),
            channel(texel[2], self.tint[2], self.background[2]),
            255,
        ]
    }
}
