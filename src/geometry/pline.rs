use crate::math::{Point2, LENGTH_TOLERANCE};

use super::curve::{Arc2d, Curve2d, Segment2d};

/// Bulge-encoded polyline vertex for mixed wall segments.
///
/// `bulge = tan(sweep_angle / 4)`:
/// - `0` = straight wall to next vertex
/// - `> 0` = counter-clockwise arc to next vertex
/// - `< 0` = clockwise arc to next vertex
/// - `|bulge| = 1` = semicircle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub point: Point2,
    pub bulge: f64,
}

impl PlineVertex {
    /// Creates a new vertex with the given position and bulge.
    #[must_use]
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self {
            point: Point2::new(x, y),
            bulge,
        }
    }

    /// Creates a straight vertex (bulge = 0).
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }
}

/// A wall path with mixed straight and circular-arc spans.
///
/// For closed paths the last vertex connects back to the first.
#[derive(Debug, Clone)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
    pub closed: bool,
}

impl Pline {
    /// Creates a straight-only path through `points`.
    #[must_use]
    pub fn from_points(points: &[Point2], closed: bool) -> Self {
        let vertices = points
            .iter()
            .map(|p| PlineVertex::line(p.x, p.y))
            .collect();
        Self { vertices, closed }
    }

    /// Returns the number of spans in this path.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Converts each span to a plan curve.
    ///
    /// A span whose bulge is zero, or whose chord is too short to carry an
    /// arc, becomes a straight segment.
    #[must_use]
    pub fn to_curves(&self) -> Vec<Curve2d> {
        let n = self.vertices.len();
        (0..self.segment_count())
            .map(|i| {
                let v0 = &self.vertices[i];
                let v1 = &self.vertices[(i + 1) % n];
                let chord = (v1.point - v0.point).norm();
                if v0.bulge.abs() > 1e-12 && chord > LENGTH_TOLERANCE {
                    if let Ok(arc) = Arc2d::from_bulge(&v0.point, &v1.point, v0.bulge) {
                        return Curve2d::Arc(arc);
                    }
                }
                Curve2d::Segment(Segment2d::new(v0.point, v1.point))
            })
            .collect()
    }
}
