//! 2D arc and bulge math utilities.
//!
//! Arcs are described by center, radius, start angle and a signed sweep
//! (positive = counter-clockwise). Bulge convention: `bulge = tan(sweep / 4)`.
use std::f64::consts::{PI, TAU};

use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// Center-radius-angle form of a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Returns `None` for a zero-length chord or a zero bulge (straight line).
#[must_use]
pub fn arc_from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> Option<ArcParams> {
    let chord = p1 - p0;
    let chord_len = chord.norm();

    if chord_len < 1e-12 || bulge.abs() < 1e-12 {
        return None;
    }

    // Distance from chord midpoint to center, in half-chord units.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = Point2::from((p0.coords + p1.coords) * 0.5);

    // Left normal of the chord: for positive bulge the center lies on this side.
    let normal = Vector2::new(-chord.y, chord.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    // r = d*(1+b²)/(4*|b|) from r = d/(2*sin(θ/2)) with θ = 4*atan(b)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);

    Some(ArcParams {
        center,
        radius,
        start_angle,
        sweep: 4.0 * bulge.atan(),
    })
}

/// Builds the arc that starts at `a`, passes through `m` and ends at `b`.
///
/// Returns `None` if the three points are collinear.
#[must_use]
pub fn arc_through_points(a: &Point2, m: &Point2, b: &Point2) -> Option<ArcParams> {
    let ab = b - a;
    let am = m - a;
    let turn = cross_2d(&am, &ab);
    if turn.abs() < TOLERANCE {
        return None;
    }

    // Circumcenter relative to `a`.
    let d = 2.0 * cross_2d(&am, &ab);
    let am_sq = am.norm_squared();
    let ab_sq = ab.norm_squared();
    let ux = (ab.y * am_sq - am.y * ab_sq) / d;
    let uy = (am.x * ab_sq - ab.x * am_sq) / d;
    let center = Point2::new(a.x + ux, a.y + uy);
    let radius = (a - center).norm();

    let start_angle = (a.y - center.y).atan2(a.x - center.x);
    let end_angle = (b.y - center.y).atan2(b.x - center.x);

    // `m` on the right of a->b: the arc bows right and runs counter-clockwise.
    let ccw = turn > 0.0;
    let mut sweep = end_angle - start_angle;
    if ccw {
        if sweep <= 0.0 {
            sweep += TAU;
        }
    } else if sweep >= 0.0 {
        sweep -= TAU;
    }

    Some(ArcParams {
        center,
        radius,
        start_angle,
        sweep,
    })
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Computes the unit tangent direction on an arc at parameter `t` in `[0, 1]`.
///
/// The tangent points in the direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Converts an absolute angle to an arc parameter `t` in `[0, 1]`.
///
/// Returns `None` if the angle is not within the arc's angular range.
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64) -> Option<f64> {
    if sweep.abs() < TOLERANCE {
        return None;
    }
    let eps = TOLERANCE * 100.0;
    let mut delta = angle - start_angle;

    if sweep > 0.0 {
        while delta < -eps {
            delta += TAU;
        }
        while delta > TAU + eps {
            delta -= TAU;
        }
    } else {
        while delta > eps {
            delta -= TAU;
        }
        while delta < -TAU - eps {
            delta += TAU;
        }
    }

    let t = delta / sweep;
    if t >= -eps && t <= 1.0 + eps {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Number of chords needed so that no chord deviates from the arc by more
/// than `tolerance` (sagitta bound).
#[must_use]
pub fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> usize {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // sagitta = r * (1 - cos(θ/2))  =>  θ = 2 * acos(1 - tolerance/r)
    let max_angle = if tolerance >= radius {
        PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as usize;
    n.max(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn semicircle_ccw_goes_through_bottom() {
        let arc = arc_from_bulge(&p(0.0, 0.0), &p(2.0, 0.0), 1.0).unwrap();
        assert!((arc.center.x - 1.0).abs() < TOL);
        assert!(arc.center.y.abs() < TOL);
        assert!((arc.radius - 1.0).abs() < TOL);
        assert!((arc.sweep - PI).abs() < TOL);

        let mid = arc_point_at(&arc.center, arc.radius, arc.start_angle, arc.sweep, 0.5);
        assert!((mid.x - 1.0).abs() < TOL, "mid.x={}", mid.x);
        assert!((mid.y + 1.0).abs() < TOL, "mid.y={}", mid.y);

        let end = arc_point_at(&arc.center, arc.radius, arc.start_angle, arc.sweep, 1.0);
        assert!((end.x - 2.0).abs() < TOL);
    }

    #[test]
    fn zero_bulge_is_not_an_arc() {
        assert!(arc_from_bulge(&p(0.0, 0.0), &p(1.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn three_point_arc_ccw() {
        // Quarter circle (1,0) -> (0,1) through (cos45, sin45).
        let h = (PI / 4.0).cos();
        let arc = arc_through_points(&p(1.0, 0.0), &p(h, h), &p(0.0, 1.0)).unwrap();
        assert!(arc.center.x.abs() < 1e-9 && arc.center.y.abs() < 1e-9);
        assert!((arc.radius - 1.0).abs() < 1e-9);
        assert!((arc.sweep - PI / 2.0).abs() < 1e-9, "sweep={}", arc.sweep);
    }

    #[test]
    fn three_point_arc_cw() {
        // Upper semicircle traced clockwise from (-1,0) over (0,1) to (1,0).
        let arc = arc_through_points(&p(-1.0, 0.0), &p(0.0, 1.0), &p(1.0, 0.0)).unwrap();
        assert!((arc.sweep + PI).abs() < 1e-9, "sweep={}", arc.sweep);
        let mid = arc_point_at(&arc.center, arc.radius, arc.start_angle, arc.sweep, 0.5);
        assert!((mid.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_have_no_arc() {
        assert!(arc_through_points(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0)).is_none());
    }

    #[test]
    fn tangent_is_unit_and_follows_sweep() {
        let t0 = arc_tangent_at(0.0, PI, 0.0);
        assert!((t0.norm() - 1.0).abs() < TOL);
        assert!((t0.y - 1.0).abs() < TOL, "ccw arc leaves (1,0) upwards");
        let t1 = arc_tangent_at(0.0, -PI, 0.0);
        assert!((t1.y + 1.0).abs() < TOL, "cw arc leaves (1,0) downwards");
    }

    #[test]
    fn angle_param_out_of_range() {
        assert!(angle_to_arc_param(-PI / 2.0, 0.0, PI).is_none());
        let t = angle_to_arc_param(PI / 2.0, 0.0, PI).unwrap();
        assert!((t - 0.5).abs() < TOL);
    }

    #[test]
    fn subdivision_count_grows_with_precision() {
        assert_eq!(arc_subdivision_count(1.0, PI, 10.0), 1);
        assert!(arc_subdivision_count(1.0, PI, 0.001) > 10);
    }
}
