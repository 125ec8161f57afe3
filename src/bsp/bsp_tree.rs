// src/bsp/bsp_tree.rs

use log::{debug, info};

use crate::bsp::{BspNode, NodeId, SegPosition};
use crate::map::Segment;
use crate::utils::{intersect, point_side, RayHit, Vector2D};

/// Binary space partition over a wall list, stored as a flat arena.
///
/// Every input wall becomes exactly one node, so the tree always covers the
/// whole list it was built from. The tree is never edited; a changed wall list
/// means a fresh `build`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BspTree {
    nodes: Vec<BspNode>,
    root: Option<NodeId>,
}

/// The nearest wall a ray met while walking the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeHit {
    pub hit: RayHit,
    pub segment: Segment,
    pub node: NodeId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BspStats {
    pub nodes: usize,
    pub leaves: usize,
    /// Nodes on the longest root-to-leaf path. Zero for an empty tree.
    pub depth: usize,
}

enum Slot {
    Root,
    Front(NodeId),
    Back(NodeId),
}

impl BspTree {
    /// Partitions `segments`, always choosing the first wall of a list as the
    /// partition.
    ///
    /// Walls with both endpoints strictly in front go to the front list. All
    /// others, including walls that straddle the partition or touch its line,
    /// go to the back list unsplit.
    pub fn build(segments: &[Segment]) -> Self {
        let mut tree = BspTree {
            nodes: Vec::with_capacity(segments.len()),
            root: None,
        };
        let mut straddling = 0usize;

        // Explicit work list: a naive partition choice can produce a tree as
        // deep as the wall list is long.
        let mut pending = vec![(segments.to_vec(), Slot::Root)];
        while let Some((segs, slot)) = pending.pop() {
            let Some((partition, rest)) = segs.split_first() else {
                continue;
            };

            let mut front_segs = Vec::new();
            let mut back_segs = Vec::new();
            for seg in rest {
                match classify_seg_against_partition(seg, partition) {
                    SegPosition::Front => front_segs.push(*seg),
                    SegPosition::Back => back_segs.push(*seg),
                    SegPosition::Spanning => {
                        straddling += 1;
                        back_segs.push(*seg);
                    }
                    SegPosition::Coincident => back_segs.push(*seg),
                }
            }

            let id = NodeId(tree.nodes.len());
            tree.nodes.push(BspNode::leaf(*partition));
            match slot {
                Slot::Root => tree.root = Some(id),
                Slot::Front(parent) => tree.nodes[parent.0].front = Some(id),
                Slot::Back(parent) => tree.nodes[parent.0].back = Some(id),
            }

            if !back_segs.is_empty() {
                pending.push((back_segs, Slot::Back(id)));
            }
            if !front_segs.is_empty() {
                pending.push((front_segs, Slot::Front(id)));
            }
        }

        let stats = tree.stats();
        info!(
            "Built BSP tree: {} nodes, {} leaves, depth {}",
            stats.nodes, stats.leaves, stats.depth
        );
        if straddling > 0 {
            debug!("{} straddling walls assigned to back lists unsplit", straddling);
        }
        tree
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &BspNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Every partition wall reachable from the root, in no particular order.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Nearest wall hit by the ray `origin + u * direction`, `u > 0`.
    ///
    /// Visits every node; only the globally nearest hit is kept.
    pub fn nearest_hit(&self, origin: Vector2D, direction: Vector2D) -> Option<TreeHit> {
        let mut nearest: Option<TreeHit> = None;
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if let Some(hit) = intersect(origin, direction, &node.partition) {
                if nearest.map_or(true, |n| hit.distance < n.hit.distance) {
                    nearest = Some(TreeHit {
                        hit,
                        segment: node.partition,
                        node: id,
                    });
                }
            }
            stack.extend(node.children());
        }

        nearest
    }

    /// Walks the tree in painter's order as seen from `view`: far subtrees
    /// first, then the partition, then near subtrees.
    pub fn walk_back_to_front<F: FnMut(NodeId, &BspNode)>(&self, view: Vector2D, mut visit: F) {
        enum Step {
            Descend(NodeId),
            Emit(NodeId),
        }

        let mut steps: Vec<Step> = self.root.map(Step::Descend).into_iter().collect();
        while let Some(step) = steps.pop() {
            match step {
                Step::Emit(id) => visit(id, &self.nodes[id.0]),
                Step::Descend(id) => {
                    let node = &self.nodes[id.0];
                    let (far, near) = if point_side(view, &node.partition) > 0.0 {
                        (node.back, node.front)
                    } else {
                        (node.front, node.back)
                    };
                    // Pushed in reverse so `far` comes off first.
                    steps.extend(near.map(Step::Descend));
                    steps.push(Step::Emit(id));
                    steps.extend(far.map(Step::Descend));
                }
            }
        }
    }

    pub fn stats(&self) -> BspStats {
        let mut stats = BspStats {
            nodes: self.nodes.len(),
            ..BspStats::default()
        };
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            stats.depth = stats.depth.max(depth);
            if node.is_leaf() {
                stats.leaves += 1;
            }
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }
        stats
    }
}

fn classify_seg_against_partition(seg: &Segment, partition: &Segment) -> SegPosition {
    let start_side = point_side(seg.start, partition);
    let end_side = point_side(seg.end, partition);

    if start_side > 0.0 && end_side > 0.0 {
        SegPosition::Front
    } else if start_side < 0.0 && end_side < 0.0 {
        SegPosition::Back
    } else if start_side * end_side < 0.0 {
        SegPosition::Spanning
    } else {
        SegPosition::Coincident
    }
}

pub struct Segments<'a> {
    tree: &'a BspTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.0];
        self.stack.extend(node.children());
        Some(&node.partition)
    }
}
