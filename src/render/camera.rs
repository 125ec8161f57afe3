// src/render/camera.rs

use crate::utils::Vector2D;

/// Where the viewer stands and looks, supplied once per frame.
///
/// `direction` is a unit vector; `plane` is perpendicular to it and its length
/// sets the field of view (length 1 is 90 degrees). Rays are
/// `direction + plane * c` for a camera-plane offset `c` in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vector2D,
    pub direction: Vector2D,
    pub plane: Vector2D,
}

/// The ray cast for one screen column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRay {
    /// Camera-plane offset, `2x / width - 1`.
    pub offset: f64,
    /// Unit ray direction.
    pub direction: Vector2D,
    /// Cosine between the ray and the view axis. Multiplying a Euclidean hit
    /// distance by this removes the fisheye curvature.
    pub fisheye: f64,
}

impl CameraPose {
    pub fn new(position: Vector2D, direction: Vector2D, plane: Vector2D) -> Self {
        CameraPose {
            position,
            direction: direction.normalize(),
            plane,
        }
    }

    /// Looking along `angle` radians with a 90 degree field of view.
    pub fn from_angle(position: Vector2D, angle: f64) -> Self {
        Self::with_fov(position, angle, std::f64::consts::FRAC_PI_2)
    }

    pub fn with_fov(position: Vector2D, angle: f64, fov: f64) -> Self {
        let direction = Vector2D::from_angle(angle, 1.0);
        let plane = direction.perpendicular() * (fov / 2.0).tan();
        CameraPose {
            position,
            direction,
            plane,
        }
    }

    pub fn angle(&self) -> f64 {
        self.direction.angle()
    }

    pub fn fov(&self) -> f64 {
        2.0 * self.plane.length().atan()
    }

    /// Turns direction and plane together by `delta` radians.
    pub fn rotated(&self, delta: f64) -> Self {
        CameraPose {
            position: self.position,
            direction: self.direction.rotated(delta),
            plane: self.plane.rotated(delta),
        }
    }

    pub fn column_ray(&self, x: usize, width: usize) -> ColumnRay {
        let offset = 2.0 * x as f64 / width as f64 - 1.0;
        let direction = (self.direction + self.plane * offset).normalize();
        ColumnRay {
            offset,
            direction,
            fisheye: direction.dot(&self.direction),
        }
    }
}

impl ColumnRay {
    /// Distance along the view axis for a hit `distance` along this ray.
    pub fn correct(&self, distance: f64) -> f64 {
        distance * self.fisheye
    }
}

/// `distance * cos(atan(c))`, written as `distance / sqrt(1 + c^2)`. Only holds
/// for a 90 degree camera.
#[cfg(test)]
pub(crate) fn corrected_distance(distance: f64, offset: f64) -> f64 {
    distance / (1.0 + offset * offset).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_centre_column_looks_straight_ahead() {
        let camera = CameraPose::from_angle(Vector2D::new(3.0, 3.0), 0.0);
        let ray = camera.column_ray(320, 640);
        assert_eq!(ray.offset, 0.0);
        assert_approx_eq!(ray.direction.x, 1.0, 1e-12);
        assert_approx_eq!(ray.direction.y, 0.0, 1e-12);
        assert_approx_eq!(ray.fisheye, 1.0, 1e-12);
    }

    #[test]
    fn test_angle_and_plane_forms_agree() {
        let angle = 1.1;
        let camera = CameraPose::from_angle(Vector2D::ZERO, angle);
        for x in (0..640).step_by(37) {
            let ray = camera.column_ray(x, 640);
            let from_angle = Vector2D::from_angle(angle + ray.offset.atan(), 1.0);
            assert_approx_eq!(ray.direction.x, from_angle.x, 1e-12);
            assert_approx_eq!(ray.direction.y, from_angle.y, 1e-12);
            assert_approx_eq!(ray.fisheye, ray.offset.atan().cos(), 1e-12);
            assert_approx_eq!(ray.fisheye, corrected_distance(1.0, ray.offset), 1e-12);
            assert_approx_eq!(ray.correct(3.0), corrected_distance(3.0, ray.offset), 1e-12);
        }
    }

    #[test]
    fn test_left_edge_offset() {
        let camera = CameraPose::from_angle(Vector2D::ZERO, 0.0);
        assert_eq!(camera.column_ray(0, 800).offset, -1.0);
    }

    #[test]
    fn test_fov_round_trip() {
        let camera = CameraPose::with_fov(Vector2D::ZERO, 0.25, 60f64.to_radians());
        assert_approx_eq!(camera.fov(), 60f64.to_radians(), 1e-12);
        assert_approx_eq!(camera.angle(), 0.25, 1e-12);
    }

    #[test]
    fn test_rotation_keeps_plane_perpendicular() {
        let camera = CameraPose::from_angle(Vector2D::ZERO, 0.0).rotated(0.7);
        assert_approx_eq!(camera.angle(), 0.7, 1e-12);
        assert_approx_eq!(camera.direction.dot(&camera.plane), 0.0, 1e-12);
        assert_approx_eq!(camera.plane.length(), 1.0, 1e-12);
    }
}
