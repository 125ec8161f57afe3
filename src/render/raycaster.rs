// src/render/raycaster.rs

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::bsp::BspTree;
use crate::error::Result;
use crate::map::Segment;
use crate::render::camera::CameraPose;
use crate::render::compositor::{SliceProjector, WallSlice};
use crate::utils::Vector2D;

/// The nearest wall a column's ray met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Euclidean distance from the camera to the hit.
    pub distance: f64,
    /// Distance along the view axis, free of fisheye distortion.
    pub corrected_distance: f64,
    pub point: Vector2D,
    pub segment: Segment,
    /// Camera-plane offset of the column.
    pub offset: f64,
}

/// Per-column output of one frame. A column whose ray escaped the map has none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnResult {
    pub hit: WallHit,
    pub slice: WallSlice,
}

/// Casts one ray per screen column, fanning contiguous column chunks out over
/// a fixed worker pool.
pub struct RayCaster {
    pool: ThreadPool,
    chunk_size: usize,
}

impl RayCaster {
    /// `worker_threads == 0` lets rayon pick one worker per core.
    pub fn new(worker_threads: usize, chunk_size: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|i| format!("raycast-{}", i))
            .build()?;
        debug!(
            "Raycast pool: {} workers, {} columns per chunk",
            pool.current_num_threads(),
            chunk_size.max(1)
        );
        Ok(RayCaster {
            pool,
            chunk_size: chunk_size.max(1),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Fills `columns` (one slot per screen column) for this frame.
    ///
    /// Each chunk writes only its own index range, and the call returns once
    /// every chunk is done.
    pub fn cast(
        &self,
        tree: &BspTree,
        camera: &CameraPose,
        projector: &SliceProjector,
        columns: &mut [Option<ColumnResult>],
    ) {
        let width = columns.len();
        let chunk_size = self.chunk_size;

        self.pool.install(|| {
            columns
                .par_chunks_mut(chunk_size)
                .enumerate()
                .for_each(|(chunk, slots)| {
                    let first = chunk * chunk_size;
                    for (i, slot) in slots.iter_mut().enumerate() {
                        *slot = cast_column(tree, camera, projector, first + i, width);
                    }
                });
        });
    }
}

/// Finds the nearest wall for column `x` and projects it.
pub fn cast_column(
    tree: &BspTree,
    camera: &CameraPose,
    projector: &SliceProjector,
    x: usize,
    width: usize,
) -> Option<ColumnResult> {
    let hit = column_hit(tree, camera, x, width)?;
    let slice = projector.project(&hit)?;
    Some(ColumnResult { hit, slice })
}

pub fn column_hit(tree: &BspTree, camera: &CameraPose, x: usize, width: usize) -> Option<WallHit> {
    let ray = camera.column_ray(x, width);
    let nearest = tree.nearest_hit(camera.position, ray.direction)?;
    Some(WallHit {
        distance: nearest.hit.distance,
        corrected_distance: ray.correct(nearest.hit.distance),
        point: nearest.hit.point,
        segment: nearest.segment,
        offset: ray.offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::camera::corrected_distance;
    use crate::render::lighting::Lighting;
    use assert_approx_eq::assert_approx_eq;

    fn projector(screen_height: usize) -> SliceProjector {
        SliceProjector {
            screen_height,
            texture_width: 64,
            texture_height: 64,
            texture_repeat: 1.0,
            lighting: Lighting::default(),
        }
    }

    fn wall_at_x5() -> BspTree {
        BspTree::build(&[Segment::from_coords(5.0, 0.0, 5.0, 10.0)])
    }

    #[test]
    fn test_wall_straight_ahead() {
        let tree = wall_at_x5();
        let camera = CameraPose::from_angle(Vector2D::new(3.0, 3.0), 0.0);
        let width = 640;

        let result = cast_column(&tree, &camera, &projector(480), width / 2, width).unwrap();
        assert_eq!(result.hit.offset, 0.0);
        assert_approx_eq!(result.hit.distance, 2.0, 1e-12);
        assert_approx_eq!(result.hit.corrected_distance, 2.0, 1e-12);
        assert!(result.slice.line_height > 0);
        let centre = (result.slice.draw_start + result.slice.draw_end) / 2;
        assert_eq!(centre, 240);
    }

    #[test]
    fn test_fisheye_correction_for_perpendicular_wall() {
        let tree = wall_at_x5();
        let camera = CameraPose::from_angle(Vector2D::new(3.0, 3.0), 0.0);
        let width = 640;

        for x in [100, 200, 320, 450, 600] {
            let hit = column_hit(&tree, &camera, x, width).unwrap();
            assert_approx_eq!(
                hit.corrected_distance,
                corrected_distance(hit.distance, hit.offset),
                1e-9
            );
            // A flat wall stays flat: every column sees the same axial distance.
            assert_approx_eq!(hit.corrected_distance, 2.0, 1e-9);
        }
    }

    #[test]
    fn test_fisheye_correction_at_narrow_fov() {
        let tree = wall_at_x5();
        let camera = CameraPose::with_fov(Vector2D::new(3.0, 3.0), 0.0, 60f64.to_radians());
        let width = 320;

        for x in 0..width {
            let hit = column_hit(&tree, &camera, x, width).unwrap();
            assert_approx_eq!(hit.corrected_distance, 2.0, 1e-9);
        }
        // Edge rays travel further than the centre ray.
        let edge = column_hit(&tree, &camera, 0, width).unwrap();
        assert!(edge.distance > 2.0 + 1e-3);
    }

    #[test]
    fn test_escaped_rays_leave_empty_columns() {
        let tree = wall_at_x5();
        let camera = CameraPose::from_angle(Vector2D::new(3.0, 3.0), std::f64::consts::PI);
        let caster = RayCaster::new(2, 16).unwrap();
        let mut columns = vec![None; 64];
        caster.cast(&tree, &camera, &projector(48), &mut columns);
        assert!(columns.iter().all(Option::is_none));
    }

    #[test]
    fn test_parallel_cast_matches_sequential() {
        let mut walls = Vec::new();
        walls.extend(Segment::box_walls(0.0, 0.0, 25.0, 25.0));
        walls.extend(Segment::box_walls(5.0, 5.0, 5.0, 5.0));
        walls.extend(Segment::box_walls(15.0, 15.0, 5.0, 5.0));
        let tree = BspTree::build(&walls);
        let camera = CameraPose::from_angle(Vector2D::new(12.0, 12.0), 0.8);
        let projector = projector(200);
        let width = 333;

        let expected: Vec<_> = (0..width)
            .map(|x| cast_column(&tree, &camera, &projector, x, width))
            .collect();

        for (workers, chunk) in [(1, 1), (3, 7), (4, 64), (2, 1000)] {
            let caster = RayCaster::new(workers, chunk).unwrap();
            let mut columns = vec![None; width];
            caster.cast(&tree, &camera, &projector, &mut columns);
            assert_eq!(columns, expected);
        }
    }

    #[test]
    fn test_zero_chunk_size_is_bumped() {
        let caster = RayCaster::new(1, 0).unwrap();
        assert_eq!(caster.chunk_size(), 1);
        assert_eq!(caster.workers(), 1);
    }
}
