// src/lib.rs

pub mod bsp;
pub mod config;
pub mod error;
pub mod map;
pub mod render;
pub mod scene;
pub mod utils;

pub use config::RenderConfig;
pub use error::{CasterError, Result};
