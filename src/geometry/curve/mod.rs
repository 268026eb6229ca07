mod arc;
mod circle;
mod segment;

pub use arc::Arc2d;
pub use circle::Circle2d;
pub use segment::Segment2d;

use crate::math::arc_2d::{arc_subdivision_count, ArcParams};
use crate::math::distance_2d::Projection;
use crate::math::intersect_2d::{
    arc_arc_intersect_2d, segment_arc_intersect_2d, segment_segment_intersect_2d, Crossing,
};
use crate::math::{Point2, Vector2};

/// Trait for parametric plan curves over `t` in `[0, 1]`.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point2;

    /// Unit tangent at parameter `t`, pointing towards increasing `t`.
    fn tangent(&self, t: f64) -> Vector2;

    /// Arc length of the whole curve.
    fn length(&self) -> f64;

    /// Closest point of the curve to `point`.
    fn project(&self, point: &Point2) -> Projection;

    /// Returns whether the curve ends where it starts.
    fn is_closed(&self) -> bool;
}

/// Any wall or boundary curve accepted by the arrangement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve2d {
    /// A straight segment.
    Segment(Segment2d),
    /// A circular arc.
    Arc(Arc2d),
    /// A full circle.
    Circle(Circle2d),
}

impl Curve2d {
    /// Point at `t = 0`.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.evaluate(0.0)
    }

    /// Point at `t = 1`.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.evaluate(1.0)
    }

    /// Arc parameters for curved variants, `None` for segments.
    #[must_use]
    pub fn arc_params(&self) -> Option<ArcParams> {
        match self {
            Self::Segment(_) => None,
            Self::Arc(a) => Some(a.params()),
            Self::Circle(c) => Some(c.params()),
        }
    }

    /// Polyline through the curve between `t0` and `t1`, both ends included.
    ///
    /// Segments yield their two end points. Arcs are split so that no chord
    /// deviates more than `chord_tolerance` from the true curve, clamped to
    /// `[min_segments, max_segments]` chords.
    #[must_use]
    pub fn sample(
        &self,
        t0: f64,
        t1: f64,
        chord_tolerance: f64,
        min_segments: usize,
        max_segments: usize,
    ) -> Vec<Point2> {
        let Some(params) = self.arc_params() else {
            return vec![self.evaluate(t0), self.evaluate(t1)];
        };

        let abs_sweep = (params.sweep * (t1 - t0)).abs();
        let n = arc_subdivision_count(params.radius, abs_sweep, chord_tolerance)
            .clamp(min_segments.max(1), max_segments.max(1));

        #[allow(clippy::cast_precision_loss)]
        let step = (t1 - t0) / n as f64;
        let mut points = Vec::with_capacity(n + 1);
        points.push(self.evaluate(t0));
        for i in 1..n {
            #[allow(clippy::cast_precision_loss)]
            points.push(self.evaluate(t0 + step * i as f64));
        }
        points.push(self.evaluate(t1));
        points
    }

    /// Crossings between this curve and `other`.
    ///
    /// `t_a` refers to `self`, `t_b` to `other`. Collinear or concentric
    /// overlaps are not reported here.
    #[must_use]
    pub fn intersect(&self, other: &Curve2d) -> Vec<Crossing> {
        match (self, other) {
            (Self::Segment(a), Self::Segment(b)) => {
                segment_segment_intersect_2d(a.start(), a.end(), b.start(), b.end())
                    .map(|(point, t_a, t_b)| Crossing { point, t_a, t_b })
                    .into_iter()
                    .collect()
            }
            (Self::Segment(a), _) => other
                .arc_params()
                .map(|arc| segment_arc_intersect_2d(a.start(), a.end(), &arc))
                .unwrap_or_default(),
            (_, Self::Segment(_)) => other
                .intersect(self)
                .into_iter()
                .map(|c| Crossing {
                    point: c.point,
                    t_a: c.t_b,
                    t_b: c.t_a,
                })
                .collect(),
            _ => match (self.arc_params(), other.arc_params()) {
                (Some(a), Some(b)) => arc_arc_intersect_2d(&a, &b),
                _ => Vec::new(),
            },
        }
    }
}

impl Curve for Curve2d {
    fn evaluate(&self, t: f64) -> Point2 {
        match self {
            Self::Segment(c) => c.evaluate(t),
            Self::Arc(c) => c.evaluate(t),
            Self::Circle(c) => c.evaluate(t),
        }
    }

    fn tangent(&self, t: f64) -> Vector2 {
        match self {
            Self::Segment(c) => c.tangent(t),
            Self::Arc(c) => c.tangent(t),
            Self::Circle(c) => c.tangent(t),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Segment(c) => c.length(),
            Self::Arc(c) => c.length(),
            Self::Circle(c) => c.length(),
        }
    }

    fn project(&self, point: &Point2) -> Projection {
        match self {
            Self::Segment(c) => c.project(point),
            Self::Arc(c) => c.project(point),
            Self::Circle(c) => c.project(point),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Self::Segment(c) => c.is_closed(),
            Self::Arc(c) => c.is_closed(),
            Self::Circle(c) => c.is_closed(),
        }
    }
}

impl From<Segment2d> for Curve2d {
    fn from(c: Segment2d) -> Self {
        Self::Segment(c)
    }
}

impl From<Arc2d> for Curve2d {
    fn from(c: Arc2d) -> Self {
        Self::Arc(c)
    }
}

impl From<Circle2d> for Curve2d {
    fn from(c: Circle2d) -> Self {
        Self::Circle(c)
    }
}
