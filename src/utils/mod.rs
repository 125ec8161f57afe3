// src/utils/mod.rs
pub mod geometry;

pub use geometry::{intersect, point_side, RayHit, Vector2D};
