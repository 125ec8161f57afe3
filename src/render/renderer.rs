// src/render/renderer.rs

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::render::camera::CameraPose;
use crate::render::compositor::{Compositor, SliceProjector};
use crate::render::framebuffer::{FrameBuffer, Rgba};
use crate::render::lighting::Lighting;
use crate::render::minimap::Minimap;
use crate::render::raycaster::{ColumnResult, RayCaster};
use crate::render::texture::Texture;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub columns_hit: usize,
    pub elapsed: Duration,
}

/// Mean of `total` over `frames`, `None` when no frame was drawn.
pub fn average_frame_time(total: Duration, frames: usize) -> Option<Duration> {
    if frames == 0 {
        return None;
    }
    Some(total.div_f64(frames as f64))
}

/// Renders whole frames: background, raycast walls, then the minimap on top.
pub struct Renderer {
    caster: RayCaster,
    compositor: Compositor,
    minimap: Minimap,
    lighting: Lighting,
    texture_repeat: f64,
    background: Rgba,
    columns: Vec<Option<ColumnResult>>,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Result<Self> {
        Ok(Renderer {
            caster: RayCaster::new(config.worker_threads, config.chunk_size)?,
            compositor: Compositor::new(config.wall_tint, config.background),
            minimap: config.minimap,
            lighting: config.lighting,
            texture_repeat: config.texture_repeat,
            background: config.background,
            columns: vec![None; config.screen_width],
        })
    }

    /// Column results of the most recent frame.
    pub fn columns(&self) -> &[Option<ColumnResult>] {
        &self.columns
    }

    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &CameraPose,
        texture: &Texture,
        frame: &mut FrameBuffer,
    ) -> FrameStats {
        let started = Instant::now();
        if self.columns.len() != frame.width() {
            self.columns.resize(frame.width(), None);
        }

        frame.clear(self.background);
        let projector = SliceProjector {
            screen_height: frame.height(),
            texture_width: texture.width(),
            texture_height: texture.height(),
            texture_repeat: self.texture_repeat,
            lighting: self.lighting,
        };

        self.caster.cast(scene.tree(), camera, &projector, &mut self.columns);
        trace!("Cast {} columns", self.columns.len());
        self.compositor.composite(frame, &self.columns, texture);
        self.minimap.draw(frame, scene.tree().segments(), camera);

        let stats = FrameStats {
            columns_hit: self.columns.iter().filter(|c| c.is_some()).count(),
            elapsed: started.elapsed(),
        };
        debug!(
            "Frame (scene gen {}): {}/{} columns hit in {:?}",
            scene.generation(),
            stats.columns_hit,
            self.columns.len(),
            stats.elapsed
        );
        stats
    }
}
