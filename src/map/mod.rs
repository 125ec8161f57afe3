// src/map/mod.rs
pub mod level;
pub mod segment;

pub use level::Level;
pub use segment::Segment;
