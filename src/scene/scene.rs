// src/scene/scene.rs

use std::sync::Arc;

use log::info;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::bsp::BspTree;
use crate::map::Segment;

/// A wall list together with the BSP tree built from it.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    segments: Vec<Segment>,
    tree: BspTree,
    generation: u64,
}

impl Scene {
    pub fn new(segments: Vec<Segment>) -> Self {
        let tree = BspTree::build(&segments);
        Scene {
            segments,
            tree,
            generation: 0,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn tree(&self) -> &BspTree {
        &self.tree
    }

    /// Bumped on every swap, starting at 0.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The scene shared between the renderer and the level watcher.
///
/// A renderer holds the read guard for a whole frame; a reload builds the new
/// tree first and then swaps list and tree under one write lock, so readers
/// never see a list paired with a tree built from a different list.
#[derive(Debug, Clone, Default)]
pub struct SharedScene {
    inner: Arc<RwLock<Scene>>,
}

impl SharedScene {
    pub fn new(segments: Vec<Segment>) -> Self {
        SharedScene {
            inner: Arc::new(RwLock::new(Scene::new(segments))),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Scene> {
        self.inner.read()
    }

    /// Rebuilds from `segments` and swaps the result in.
    pub fn replace(&self, segments: Vec<Segment>) {
        let mut next = Scene::new(segments);
        let mut scene = self.inner.write();
        next.generation = scene.generation + 1;
        *scene = next;
        info!(
            "Scene swapped to generation {} ({} walls)",
            scene.generation,
            scene.segments.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(count: usize, radius: f64) -> Vec<Segment> {
        (0..count)
            .map(|i| {
                let a = i as f64 / count as f64 * std::f64::consts::TAU;
                let b = (i + 1) as f64 / count as f64 * std::f64::consts::TAU;
                Segment::from_coords(radius * a.cos(), radius * a.sin(), radius * b.cos(), radius * b.sin())
            })
            .collect()
    }

    #[test]
    fn test_tree_matches_list() {
        let scene = Scene::new(ring(16, 5.0));
        assert_eq!(scene.tree().len(), scene.segments().len());
        assert_eq!(scene.generation(), 0);
    }

    #[test]
    fn test_replace_swaps_list_and_tree_together() {
        let shared = SharedScene::new(ring(4, 1.0));
        shared.replace(ring(9, 2.0));
        let scene = shared.read();
        assert_eq!(scene.generation(), 1);
        assert_eq!(scene.segments().len(), 9);
        assert_eq!(scene.tree().len(), 9);
    }

    #[test]
    fn test_readers_never_see_a_torn_scene() {
        let shared = SharedScene::new(ring(3, 1.0));
        std::thread::scope(|s| {
            s.spawn(|| {
                for n in 4..40 {
                    shared.replace(ring(n, n as f64));
                }
            });
            s.spawn(|| {
                for _ in 0..200 {
                    let scene = shared.read();
                    assert_eq!(scene.tree().len(), scene.segments().len());
                    for wall in scene.tree().segments() {
                        assert!(scene.segments().contains(wall));
                    }
                }
            });
        });
        assert_eq!(shared.read().generation(), 36);
    }
}
