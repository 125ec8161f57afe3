// src/config.rs

//! Runtime settings, read from an optional JSON file. Every field has a default,
//! so a config file only needs the values it changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{CasterError, Result};
use crate::render::framebuffer::Rgba;
use crate::render::lighting::Lighting;
use crate::render::minimap::Minimap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub screen_width: usize,
    pub screen_height: usize,
    /// Screen columns handed to one raycast worker at a time.
    pub chunk_size: usize,
    /// 0 means one worker per core.
    pub worker_threads: usize,
    pub fov_degrees: f64,
    pub texture_repeat: f64,
    pub wall_tint: [u8; 3],
    pub background: Rgba,
    pub lighting: Lighting,
    pub minimap: Minimap,

    pub level_path: PathBuf,
    /// Every coordinate in the level file is divided by this.
    pub level_scale: f64,
    pub texture_path: PathBuf,
    pub output_path: PathBuf,
    pub poll_interval_ms: u64,

    pub frames: usize,
    /// Used when the level file has no start line.
    pub start_position: [f64; 2],
    pub start_angle: f64,
    /// Radians turned between frames.
    pub turn_per_frame: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            screen_width: 1280,
            screen_height: 720,
            chunk_size: 64,
            worker_threads: 0,
            fov_degrees: 90.0,
            texture_repeat: 1.0,
            wall_tint: [204, 204, 204],
            background: [0, 0, 0, 255],
            lighting: Lighting::default(),
            minimap: Minimap::default(),
            level_path: PathBuf::from("vecs.txt"),
            level_scale: 1.0,
            texture_path: PathBuf::from("wall.png"),
            output_path: PathBuf::from("frame.png"),
            poll_interval_ms: 500,
            frames: 1,
            start_position: [3.0, 3.0],
            start_angle: 0.0,
            turn_per_frame: 0.0,
        }
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CasterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| CasterError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config {:?}", path);
        Ok(config)
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn fov(&self) -> f64 {
        self.fov_degrees.to_radians()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
