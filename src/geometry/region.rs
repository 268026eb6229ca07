use crate::math::polygon_2d::{
    dedup_points, locate_point, polygon_self_intersects, rotate_to_canonical_start,
    signed_area_2d, with_orientation, PointLocation,
};
use crate::math::{Point2, Vector2, TOLERANCE};

/// A closed planar area: one outer boundary and zero or more holes.
///
/// Normalized regions have a counter-clockwise outer boundary, clockwise
/// holes, no closing duplicate point, and every ring rotated to start at
/// its leftmost-bottom point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    pub outer: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl Region {
    /// Creates a region from raw rings without normalizing them.
    #[must_use]
    pub fn new(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Self {
        Self { outer, holes }
    }

    /// Creates a hole-free region from an outline.
    #[must_use]
    pub fn from_outline(outer: Vec<Point2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Returns the canonical form of this region.
    ///
    /// Holes that collapse below three points are dropped.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let outer = normalize_ring(&self.outer, true);
        let holes = self
            .holes
            .iter()
            .map(|h| normalize_ring(h, false))
            .filter(|h| h.len() >= 3)
            .collect();
        Self { outer, holes }
    }

    /// Signed shoelace area of the outer ring.
    #[must_use]
    pub fn signed_outer_area(&self) -> f64 {
        signed_area_2d(&self.outer)
    }

    /// Net enclosed area: outer minus holes, independent of winding.
    #[must_use]
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area_2d(h).abs()).sum();
        signed_area_2d(&self.outer).abs() - holes
    }

    /// Returns `true` if `point` lies inside the region or on any of its
    /// boundaries (within `tol`).
    #[must_use]
    pub fn contains_point(&self, point: &Point2, tol: f64) -> bool {
        if locate_point(point, &self.outer, tol) == PointLocation::Outside {
            return false;
        }
        self.holes
            .iter()
            .all(|h| locate_point(point, h, tol) != PointLocation::Inside)
    }

    /// Returns `true` if the outer ring and every hole are simple polygons
    /// with non-zero area.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let ring_ok = |ring: &[Point2]| {
            ring.len() >= 3
                && signed_area_2d(ring).abs() > TOLERANCE
                && !polygon_self_intersects(ring)
        };
        ring_ok(self.outer.as_slice()) && self.holes.iter().all(|h| ring_ok(h.as_slice()))
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        let shift = |ring: &Vec<Point2>| -> Vec<Point2> { ring.iter().map(|p| p + offset).collect() };
        Self {
            outer: shift(&self.outer),
            holes: self.holes.iter().map(shift).collect(),
        }
    }
}

/// Returns `true` if `point` is inside (or on the boundary of) any region.
#[must_use]
pub fn point_in_regions(point: &Point2, regions: &[Region], tol: f64) -> bool {
    regions.iter().any(|r| r.contains_point(point, tol))
}

fn normalize_ring(ring: &[Point2], ccw: bool) -> Vec<Point2> {
    let cleaned = dedup_points(ring, TOLERANCE);
    rotate_to_canonical_start(&with_orientation(&cleaned, ccw))
}
