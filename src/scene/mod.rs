// src/scene/mod.rs
mod scene;
pub mod watcher;

pub use scene::{Scene, SharedScene};
pub use watcher::LevelWatcher;
