//! src/bsp/bsp_node.rs

use crate::map::Segment;

/// Index of a node inside a [`BspTree`](crate::bsp::BspTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the BSP tree. Each node has:
/// - The wall it was partitioned on.
/// - Optionally a `front` child and a `back` child.
///
/// A node without children is a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct BspNode {
    pub partition: Segment,
    pub front: Option<NodeId>,
    pub back: Option<NodeId>,
}

impl BspNode {
    pub fn leaf(partition: Segment) -> Self {
        BspNode {
            partition,
            front: None,
            back: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Children in `(front, back)` order, skipping the missing ones.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.front.into_iter().chain(self.back)
    }
}
