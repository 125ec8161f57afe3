// src/render/mod.rs
pub mod camera;
pub mod compositor;
pub mod framebuffer;
pub mod lighting;
pub mod minimap;
pub mod raycaster;
pub mod renderer;
pub mod texture;

pub use camera::{CameraPose, ColumnRay};
pub use compositor::{Compositor, SliceProjector, WallSlice};
pub use framebuffer::{FrameBuffer, Rgba};
pub use lighting::Lighting;
pub use minimap::Minimap;
pub use raycaster::{ColumnResult, RayCaster, WallHit};
pub use renderer::{average_frame_time, FrameStats, Renderer};
pub use texture::Texture;
