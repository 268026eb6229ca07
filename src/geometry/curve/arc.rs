use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{arc_from_bulge, arc_point_at, arc_tangent_at, arc_through_points, ArcParams};
use crate::math::distance_2d::{project_on_arc, Projection};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::Curve;

/// A circular arc in the plan.
///
/// Defined by a center, radius, start angle and a signed sweep in radians
/// (positive = counter-clockwise). The parametric form is
/// `P(t) = center + radius * (cos a, sin a)` with `a = start_angle + t * sweep`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc2d {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Arc2d {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the sweep is zero or
    /// exceeds a full turn.
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()).into());
        }
        if sweep.abs() > TAU + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "sweep",
                value: sweep,
                min: -TAU,
                max: TAU,
            }
            .into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Builds an arc from two endpoints and a bulge factor (`tan(sweep / 4)`).
    ///
    /// # Errors
    ///
    /// Returns an error if the chord is zero-length or the bulge is zero.
    pub fn from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> Result<Self> {
        let params = arc_from_bulge(p0, p1, bulge).ok_or_else(|| {
            GeometryError::Degenerate("bulge arc needs a chord and a non-zero bulge".into())
        })?;
        Ok(Self::from(params))
    }

    /// Builds the arc that starts at `start`, passes through `mid` and ends at `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the three points are collinear.
    pub fn through(start: &Point2, mid: &Point2, end: &Point2) -> Result<Self> {
        let params = arc_through_points(start, mid, end)
            .ok_or_else(|| GeometryError::Degenerate("three-point arc is collinear".into()))?;
        Ok(Self::from(params))
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the signed sweep in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns `true` if the arc runs counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.sweep > 0.0
    }

    /// Returns the center-radius-angle parameters of this arc.
    #[must_use]
    pub fn params(&self) -> ArcParams {
        ArcParams {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle,
            sweep: self.sweep,
        }
    }
}

impl From<ArcParams> for Arc2d {
    fn from(p: ArcParams) -> Self {
        Self {
            center: p.center,
            radius: p.radius,
            start_angle: p.start_angle,
            sweep: p.sweep,
        }
    }
}

impl Curve for Arc2d {
    fn evaluate(&self, t: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, t)
    }

    fn tangent(&self, t: f64) -> Vector2 {
        arc_tangent_at(self.start_angle, self.sweep, t)
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    fn project(&self, point: &Point2) -> Projection {
        project_on_arc(point, &self.center, self.radius, self.start_angle, self.sweep)
    }

    fn is_closed(&self) -> bool {
        (self.sweep.abs() - TAU).abs() < TOLERANCE
    }
}
