// src/map/segment.rs
use crate::utils::Vector2D;

/// One wall of the map: a straight line between two points.
///
/// Segments are never edited in place; a level reload replaces the whole list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vector2D,
    pub end: Vector2D,
}

impl Segment {
    pub fn new(start: Vector2D, end: Vector2D) -> Self {
        Segment { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Segment::new(Vector2D::new(x1, y1), Vector2D::new(x2, y2))
    }

    /// `end - start`, not normalized.
    pub fn direction(&self) -> Vector2D {
        self.end - self.start
    }

    pub fn unit_direction(&self) -> Vector2D {
        self.direction().normalize()
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// The four edges of an axis-aligned box, wound top, right, bottom, left.
    pub fn box_walls(x: f64, y: f64, width: f64, height: f64) -> [Segment; 4] {
        [
            Segment::from_coords(x, y, x + width, y),
            Segment::from_coords(x + width, y, x + width, y + height),
            Segment::from_coords(x + width, y + height, x, y + height),
            Segment::from_coords(x, y + height, x, y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_walls_are_closed() {
        let walls = Segment::box_walls(1.0, 2.0, 10.0, 5.0);
        for pair in walls.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(walls[3].end, walls[0].start);
        assert_eq!(walls[0].length(), 10.0);
        assert_eq!(walls[1].length(), 5.0);
    }
}
