use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{arc_point_at, arc_tangent_at, ArcParams};
use crate::math::distance_2d::{project_on_arc, Projection};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::Curve;

/// A full circle, typically a round column outline.
///
/// Traced counter-clockwise starting at `center + (radius, 0)`; `t = 0` and
/// `t = 1` land on the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle2d {
    center: Point2,
    radius: f64,
}

impl Circle2d {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("circle radius must be positive".into()).into(),
            );
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The circle as a full counter-clockwise arc starting at angle zero.
    #[must_use]
    pub fn params(&self) -> ArcParams {
        ArcParams {
            center: self.center,
            radius: self.radius,
            start_angle: 0.0,
            sweep: TAU,
        }
    }
}

impl Curve for Circle2d {
    fn evaluate(&self, t: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, 0.0, TAU, t)
    }

    fn tangent(&self, t: f64) -> Vector2 {
        arc_tangent_at(0.0, TAU, t)
    }

    fn length(&self) -> f64 {
        TAU * self.radius
    }

    fn project(&self, point: &Point2) -> Projection {
        project_on_arc(point, &self.center, self.radius, 0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn closes_on_itself() {
        let c = Circle2d::new(Point2::new(1.0, 1.0), 0.5).unwrap();
        assert!((c.evaluate(0.0) - c.evaluate(1.0)).norm() < 1e-12);
        assert!(c.is_closed());
    }

    #[test]
    fn projects_radially() {
        let c = Circle2d::new(Point2::origin(), 1.0).unwrap();
        let pr = c.project(&Point2::new(0.0, 3.0));
        assert!((pr.distance - 2.0).abs() < 1e-12);
        assert!((pr.t - 0.25).abs() < 1e-9, "t={}", pr.t);
    }

    #[test]
    fn rejects_negative_radius() {
        assert!(Circle2d::new(Point2::origin(), -1.0).is_err());
    }
}
