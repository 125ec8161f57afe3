// src/bsp/mod.rs
pub mod bsp_node;
pub mod bsp_tree;

pub use bsp_node::{BspNode, NodeId};
pub use bsp_tree::{BspStats, BspTree, Segments, TreeHit};

// Classification of a wall against a partition line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegPosition {
    Front,
    Back,
    Spanning,
    /// At least one endpoint lies on the partition line.
    Coincident,
}
