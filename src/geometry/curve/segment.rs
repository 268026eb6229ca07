use crate::math::distance_2d::{project_on_segment, Projection};
use crate::math::{Point2, Vector2};

use super::Curve;

/// A bounded straight wall segment from `start` to `end`.
///
/// The parametric form is `P(t) = start + t * (end - start)` for `t` in `[0, 1]`.
/// Zero-length segments are representable; the arrangement drops them when
/// assembling half-edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2d {
    start: Point2,
    end: Point2,
}

impl Segment2d {
    /// Creates a segment between two points.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Returns the vector from start to end.
    #[must_use]
    pub fn delta(&self) -> Vector2 {
        self.end - self.start
    }
}

impl Curve for Segment2d {
    fn evaluate(&self, t: f64) -> Point2 {
        self.start + self.delta() * t
    }

    fn tangent(&self, _t: f64) -> Vector2 {
        crate::math::unit(self.delta()).unwrap_or_else(Vector2::zeros)
    }

    fn length(&self) -> f64 {
        self.delta().norm()
    }

    fn project(&self, point: &Point2) -> Projection {
        project_on_segment(point, &self.start, &self.end)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_midpoint() {
        let seg = Segment2d::new(Point2::new(0.0, 0.0), Point2::new(4.0, 2.0));
        let mid = seg.evaluate(0.5);
        assert!((mid.x - 2.0).abs() < 1e-12 && (mid.y - 1.0).abs() < 1e-12);
        assert!((seg.length() - 20.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_length_tangent_is_zero() {
        let p = Point2::new(1.0, 1.0);
        let seg = Segment2d::new(p, p);
        assert!(seg.tangent(0.0).norm() < 1e-12);
    }
}
