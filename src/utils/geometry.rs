// src/utils/geometry.rs

use std::ops::{Add, Mul, Neg, Sub};

use crate::map::Segment;

/// A 2D vector, used both for map positions and for directions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians, scaled by `magnitude`.
    pub fn from_angle(angle: f64, magnitude: f64) -> Self {
        Self::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product.
    pub fn cross(&self, other: &Vector2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Vector2D) -> f64 {
        (*self - *other).length()
    }

    /// Returns the zero vector unchanged.
    pub fn normalize(&self) -> Vector2D {
        let length = self.length();
        if length == 0.0 {
            return Vector2D::ZERO;
        }
        Vector2D::new(self.x / length, self.y / length)
    }

    /// Rotated a quarter turn counter-clockwise.
    pub fn perpendicular(&self) -> Vector2D {
        Vector2D::new(-self.y, self.x)
    }

    pub fn rotated(&self, angle: f64) -> Vector2D {
        let (sin, cos) = angle.sin_cos();
        Vector2D::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, scalar: f64) -> Vector2D {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}

/// Signed cross product of the segment direction and `point - segment.start`.
///
/// Positive is the left half-plane when walking from start to end, negative the
/// right one, zero means collinear.
pub fn point_side(point: Vector2D, segment: &Segment) -> f64 {
    segment.direction().cross(&(point - segment.start))
}

/// Where a ray met a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter at the hit. Equals the Euclidean distance for a unit ray.
    pub distance: f64,
    pub point: Vector2D,
    /// Parameter along the segment, in `[0, 1]`.
    pub along: f64,
}

/// Casts a ray from `origin` along `direction` against `segment`.
///
/// Solves `origin + u * direction = start + t * (end - start)`. Only hits with
/// `t` in `[0, 1]` and `u > 0` count. Parallel lines never hit, including a ray
/// running exactly along the segment.
pub fn intersect(origin: Vector2D, direction: Vector2D, segment: &Segment) -> Option<RayHit> {
    let edge = segment.direction();
    let denom = direction.cross(&edge);
    if denom == 0.0 {
        return None;
    }

    let to_start = segment.start - origin;
    let t = to_start.cross(&direction) / denom;
    let u = to_start.cross(&edge) / denom;

    if (0.0..=1.0).contains(&t) && u > 0.0 {
        Some(RayHit {
            distance: u,
            point: segment.start + edge * t,
            along: t,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Vector2D::new(x1, y1), Vector2D::new(x2, y2))
    }

    #[test]
    fn test_vector_ops() {
        let a = Vector2D::new(3.0, 4.0);
        let b = Vector2D::new(1.0, -2.0);
        assert_eq!(a + b, Vector2D::new(4.0, 2.0));
        assert_eq!(a - b, Vector2D::new(2.0, 6.0));
        assert_eq!(a * 2.0, Vector2D::new(6.0, 8.0));
        assert_eq!(a.dot(&b), -5.0);
        assert_eq!(a.length(), 5.0);
        assert_approx_eq!(a.normalize().length(), 1.0, 1e-12);
        assert_eq!(Vector2D::ZERO.normalize(), Vector2D::ZERO);
    }

    #[test]
    fn test_rotation_matches_angle() {
        let v = Vector2D::from_angle(0.3, 1.0).rotated(0.4);
        assert_approx_eq!(v.angle(), 0.7, 1e-12);
        assert_approx_eq!(v.length(), 1.0, 1e-12);
    }

    #[test]
    fn test_point_side_sign() {
        let wall = seg(0.0, 0.0, 10.0, 0.0);
        assert!(point_side(Vector2D::new(5.0, 1.0), &wall) > 0.0);
        assert!(point_side(Vector2D::new(5.0, -1.0), &wall) < 0.0);
        assert_eq!(point_side(Vector2D::new(20.0, 0.0), &wall), 0.0);
    }

    #[test]
    fn test_hit_lies_on_segment() {
        let wall = seg(5.0, 0.0, 5.0, 10.0);
        let origin = Vector2D::new(3.0, 3.0);
        let direction = Vector2D::new(1.0, 0.5).normalize();

        let hit = intersect(origin, direction, &wall).expect("ray should hit the wall");
        assert!(hit.distance > 0.0);
        assert_approx_eq!(hit.point.x, 5.0, 1e-9);
        assert_approx_eq!(hit.point.y, 4.0, 1e-9);
        assert_approx_eq!(point_side(hit.point, &wall), 0.0, 1e-9);
        assert_approx_eq!(hit.distance, origin.distance_to(&hit.point), 1e-9);
    }

    #[test]
    fn test_behind_origin_is_a_miss() {
        let wall = seg(5.0, 0.0, 5.0, 10.0);
        let origin = Vector2D::new(3.0, 3.0);
        assert!(intersect(origin, Vector2D::new(-1.0, 0.0), &wall).is_none());
    }

    #[test]
    fn test_past_segment_end_is_a_miss() {
        let wall = seg(5.0, 0.0, 5.0, 2.0);
        let origin = Vector2D::new(3.0, 3.0);
        assert!(intersect(origin, Vector2D::new(1.0, 0.0), &wall).is_none());
    }

    #[test]
    fn test_endpoints_count_as_hits() {
        let wall = seg(5.0, 0.0, 5.0, 3.0);
        let hit = intersect(Vector2D::new(3.0, 3.0), Vector2D::new(1.0, 0.0), &wall);
        assert!(hit.is_some());
    }

    #[test]
    fn test_collinear_ray_is_a_miss() {
        let wall = seg(5.0, 0.0, 10.0, 0.0);
        assert!(intersect(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0), &wall).is_none());
    }

    #[test]
    fn test_parallel_never_hits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let start = Vector2D::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
            let direction = Vector2D::from_angle(rng.random_range(0.0..std::f64::consts::TAU), 1.0);
            let length = rng.random_range(0.1..20.0);
            let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let offset = side * rng.random_range(0.5..5.0);

            let wall = Segment::new(start, start + direction * length);
            let origin = start + direction.perpendicular() * offset;
            assert!(intersect(origin, direction, &wall).is_none());
            assert!(intersect(origin, -direction, &wall).is_none());
        }
    }
}
