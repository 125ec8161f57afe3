// src/render/minimap.rs

use serde::{Deserialize, Serialize};

use crate::map::Segment;
use crate::render::camera::CameraPose;
use crate::render::framebuffer::{FrameBuffer, Rgba};
use crate::utils::Vector2D;

/// A circular overlay map, always centred on the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Minimap {
    /// Screen position of the circle's centre.
    pub center: [f64; 2],
    /// On-screen radius in pixels.
    pub size: f64,
    /// World distance shown from the centre to the edge.
    pub radius: f64,
    pub wall_color: Rgba,
    pub player_color: Rgba,
    pub heading_color: Rgba,
    pub player_marker: f64,
    pub heading_length: f64,
}

impl Default for Minimap {
    fn default() -> Self {
        Minimap {
            center: [110.0, 110.0],
            size: 100.0,
            radius: 30.0,
            wall_color: [0, 128, 128, 255],
            player_color: [255, 255, 0, 255],
            heading_color: [255, 0, 0, 255],
            player_marker: 5.0,
            heading_length: 10.0,
        }
    }
}

impl Minimap {
    pub fn screen_center(&self) -> Vector2D {
        Vector2D::new(self.center[0], self.center[1])
    }

    fn scale(&self) -> f64 {
        self.size / self.radius
    }

    /// A wall is drawn when either endpoint is within the radius. A wall
    /// crossing the boundary always has one endpoint inside, so it qualifies too.
    pub fn is_candidate(&self, segment: &Segment, player: Vector2D) -> bool {
        let start_inside = segment.start.distance_to(&player) <= self.radius;
        let end_inside = segment.end.distance_to(&player) <= self.radius;
        start_inside || end_inside
    }

    pub fn project_point(&self, world: Vector2D, player: Vector2D) -> Vector2D {
        self.screen_center() + (world - player) * self.scale()
    }

    /// Screen-space endpoints of `segment`, clipped to the minimap circle.
    pub fn project_segment(&self, segment: &Segment, player: Vector2D) -> Option<(Vector2D, Vector2D)> {
        if !self.is_candidate(segment, player) {
            return None;
        }
        let start = self.project_point(segment.start, player);
        let end = self.project_point(segment.end, player);
        clip_line_to_circle(start, end, self.screen_center(), self.size)
    }

    pub fn project_segments<'a, I>(&self, segments: I, player: Vector2D) -> Vec<(Vector2D, Vector2D)>
    where
        I: IntoIterator<Item = &'a Segment>,
    {
        segments
            .into_iter()
            .filter_map(|seg| self.project_segment(seg, player))
            .collect()
    }

    /// Draws the clipped walls, the player marker and a heading line.
    pub fn draw<'a, I>(&self, frame: &mut FrameBuffer, segments: I, camera: &CameraPose)
    where
        I: IntoIterator<Item = &'a Segment>,
    {
        for (start, end) in self.project_segments(segments, camera.position) {
            frame.draw_line(start.x, start.y, end.x, end.y, self.wall_color);
        }

        let center = self.screen_center();
        let tip = center + camera.direction * self.heading_length;
        frame.draw_line(center.x, center.y, tip.x, tip.y, self.heading_color);
        frame.fill_circle(center.x, center.y, self.player_marker, self.player_color);
    }
}

/// Clips the line `start`-`end` to the circle. Outside endpoints are moved onto
/// the circle; a line with both endpoints outside is rejected.
pub fn clip_line_to_circle(
    start: Vector2D,
    end: Vector2D,
    center: Vector2D,
    radius: f64,
) -> Option<(Vector2D, Vector2D)> {
    let start_outside = start.distance_to(&center) > radius;
    let end_outside = end.distance_to(&center) > radius;

    match (start_outside, end_outside) {
        (false, false) => Some((start, end)),
        (true, true) => None,
        _ => {
            let dir = (end - start).normalize();
            let start = if start_outside {
                intersect_with_circle(start, dir, center, radius)
            } else {
                start
            };
            let end = if end_outside {
                intersect_with_circle(end, -dir, center, radius)
            } else {
                end
            };
            Some((start, end))
        }
    }
}

/// First point where `point + t * dir` meets the circle. Returns `point`
/// unchanged if the line misses the circle.
fn intersect_with_circle(point: Vector2D, dir: Vector2D, center: Vector2D, radius: f64) -> Vector2D {
    let rel = point - center;
    let a = dir.dot(&dir);
    let b = 2.0 * rel.dot(&dir);
    let c = rel.dot(&rel) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if a == 0.0 || discriminant < 0.0 {
        return point;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    point + dir * t
}
