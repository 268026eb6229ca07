use super::arc_2d::{angle_to_arc_param, arc_point_at};
use super::Point2;

/// Closest point of a segment to a query point.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Parameter of the foot point on the curve, in `[0, 1]`.
    pub t: f64,
    /// The foot point itself.
    pub point: Point2,
    /// Distance from the query point to the foot point.
    pub distance: f64,
}

/// Projects `p` onto the segment `a -> b`, clamping to the segment.
#[must_use]
pub fn project_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Projection {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        return Projection {
            t: 0.0,
            point: *a,
            distance: (p - a).norm(),
        };
    }

    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let foot = a + d * t;
    Projection {
        t,
        point: foot,
        distance: (p - foot).norm(),
    }
}

/// Returns the minimum distance from `p` to the segment `a -> b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    project_on_segment(p, a, b).distance
}

/// Projects `p` onto a circular arc given by center, radius, start angle and
/// signed sweep.
///
/// If the direction of `p` from the center falls inside the arc's angular
/// range the foot is the radial projection; otherwise it is the nearer arc
/// endpoint.
#[must_use]
pub fn project_on_arc(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> Projection {
    let d = p - center;
    let angle = d.y.atan2(d.x);

    if let Some(t) = angle_to_arc_param(angle, start_angle, sweep) {
        let foot = arc_point_at(center, radius, start_angle, sweep, t);
        return Projection {
            t,
            point: foot,
            distance: (p - foot).norm(),
        };
    }

    let p0 = arc_point_at(center, radius, start_angle, sweep, 0.0);
    let p1 = arc_point_at(center, radius, start_angle, sweep, 1.0);
    let d0 = (p - p0).norm();
    let d1 = (p - p1).norm();
    if d0 <= d1 {
        Projection { t: 0.0, point: p0, distance: d0 }
    } else {
        Projection { t: 1.0, point: p1, distance: d1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_dist_perpendicular_projection() {
        let pr = project_on_segment(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((pr.distance - 1.0).abs() < TOL, "d={}", pr.distance);
        assert!((pr.t - 0.5).abs() < TOL);
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        let d = point_to_segment_dist(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn arc_projection_in_range() {
        // Upper unit semicircle, query above the apex.
        let pr = project_on_arc(&p(0.0, 2.0), &p(0.0, 0.0), 1.0, 0.0, PI);
        assert!((pr.distance - 1.0).abs() < TOL, "d={}", pr.distance);
        assert!((pr.t - 0.5).abs() < 1e-9, "t={}", pr.t);
    }

    #[test]
    fn arc_projection_outside_range_uses_endpoint() {
        let pr = project_on_arc(&p(0.0, -2.0), &p(0.0, 0.0), 1.0, 0.0, PI);
        assert!((pr.distance - 5.0_f64.sqrt()).abs() < 1e-6, "d={}", pr.distance);
    }

    #[test]
    fn arc_projection_clockwise_sweep() {
        // Lower semicircle traversed clockwise from angle 0 to -pi.
        let pr = project_on_arc(&p(0.0, -1.0), &p(0.0, 0.0), 1.0, 0.0, -PI);
        assert!(pr.distance < 1e-9);
        assert!((pr.t - 0.5).abs() < 1e-9, "t={}", pr.t);
    }
}
