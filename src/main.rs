//! # bsp_caster
//!
//! Loads a wall list, builds its BSP tree and renders frames with the
//! parallel column raycaster. The level file is watched while frames are
//! drawn, and the last frame is written out as an image.
//!
//! Usage: `bsp_caster [config.json]`

use std::error::Error;
use std::time::Duration;

use log::{info, warn};

use bsp_caster::map::Level;
use bsp_caster::render::{average_frame_time, CameraPose, FrameBuffer, Renderer, Texture};
use bsp_caster::scene::{LevelWatcher, SharedScene};
use bsp_caster::utils::Vector2D;
use bsp_caster::RenderConfig;

fn load_config() -> Result<RenderConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(RenderConfig::load(path)?),
        None => {
            info!("No config given, using defaults");
            Ok(RenderConfig::default())
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("bsp_caster starting...");

    let config = load_config()?;
    let (level, loaded) = Level::load_raw(&config.level_path, config.level_scale)?;
    let texture = Texture::load(&config.texture_path)?;

    let start = level
        .start
        .unwrap_or_else(|| Vector2D::new(config.start_position[0], config.start_position[1]));
    let mut camera = CameraPose::with_fov(start, config.start_angle, config.fov());

    let scene = SharedScene::new(level.segments);
    let watcher = LevelWatcher::spawn(
        &config.level_path,
        config.level_scale,
        config.poll_interval(),
        scene.clone(),
        loaded,
    )?;

    let mut renderer = Renderer::new(&config)?;
    let mut frame = FrameBuffer::new(config.screen_width, config.screen_height);

    let mut total = Duration::ZERO;
    for _ in 0..config.frames {
        let current = scene.read();
        let stats = renderer.render(&current, &camera, &texture, &mut frame);
        drop(current);

        total += stats.elapsed;
        camera = camera.rotated(config.turn_per_frame);
    }
    watcher.stop();

    let Some(average) = average_frame_time(total, config.frames) else {
        warn!("No frames requested, nothing to write");
        return Ok(());
    };
    info!("Rendered {} frames, {:?} per frame", config.frames, average);

    frame.save(&config.output_path)?;
    info!("Wrote {:?}", config.output_path);
    Ok(())
}
