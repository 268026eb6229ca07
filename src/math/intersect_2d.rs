use super::arc_2d::{angle_to_arc_param, ArcParams};
use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// A crossing between two curves: the point and the parameter on each.
#[derive(Debug, Clone, Copy)]
pub struct Crossing {
    pub point: Point2,
    pub t_a: f64,
    pub t_b: f64,
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel (including collinear overlapping) segments return `None`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = cross_2d(&da, &db);
    if cross.abs() < TOLERANCE {
        return None;
    }

    let d = b0 - a0;
    let t = cross_2d(&d, &db) / cross;
    let u = cross_2d(&d, &da) / cross;

    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        let pt = a0 + da * t_clamped;
        Some((pt, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection of the segment `a0 -> a1` with a circular arc.
///
/// `t_a` is the segment parameter, `t_b` the arc parameter.
#[must_use]
pub fn segment_arc_intersect_2d(a0: &Point2, a1: &Point2, arc: &ArcParams) -> Vec<Crossing> {
    let mut results = Vec::new();
    if arc.radius < TOLERANCE || arc.sweep.abs() < TOLERANCE {
        return results;
    }

    let d = a1 - a0;
    let seg_len_sq = d.norm_squared();
    if seg_len_sq < TOLERANCE * TOLERANCE {
        return results;
    }

    // |a0 + t*d - c|² = r²
    let f = a0 - arc.center;
    let a = seg_len_sq;
    let b = 2.0 * f.dot(&d);
    let c = f.norm_squared() - arc.radius * arc.radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < -TOLERANCE {
        return results;
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    let t_roots = if disc_sqrt < TOLERANCE * 100.0 {
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    };

    let eps = TOLERANCE;
    for t_seg in t_roots {
        if t_seg < -eps || t_seg > 1.0 + eps {
            continue;
        }
        let t_seg = t_seg.clamp(0.0, 1.0);
        let point = a0 + d * t_seg;
        let angle = (point.y - arc.center.y).atan2(point.x - arc.center.x);
        if let Some(t_arc) = angle_to_arc_param(angle, arc.start_angle, arc.sweep) {
            results.push(Crossing {
                point,
                t_a: t_seg,
                t_b: t_arc,
            });
        }
    }

    results
}

/// Intersection of two circular arcs.
///
/// Concentric arcs report no crossings; overlapping coincident arcs are
/// resolved by vertex-on-edge snapping instead.
#[must_use]
pub fn arc_arc_intersect_2d(first: &ArcParams, second: &ArcParams) -> Vec<Crossing> {
    let mut results = Vec::new();
    let (r1, r2) = (first.radius, second.radius);
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return results;
    }

    let delta: Vector2 = second.center - first.center;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();
    if dist < TOLERANCE {
        return results;
    }

    if dist > r1 + r2 + TOLERANCE || dist < (r1 - r2).abs() - TOLERANCE {
        return results;
    }

    // Distance from the first center along the center line to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h_sq = r1 * r1 - a * a;
    if h_sq < -TOLERANCE {
        return results;
    }
    let h = h_sq.max(0.0).sqrt();

    let along = delta / dist;
    let mid = first.center + along * a;
    let perp = Vector2::new(-along.y, along.x);

    let candidates = if h < TOLERANCE {
        vec![mid]
    } else {
        vec![mid + perp * h, mid - perp * h]
    };

    for point in candidates {
        let angle1 = (point.y - first.center.y).atan2(point.x - first.center.x);
        let angle2 = (point.y - second.center.y).atan2(point.x - second.center.x);
        let t1 = angle_to_arc_param(angle1, first.start_angle, first.sweep);
        let t2 = angle_to_arc_param(angle2, second.start_angle, second.sweep);
        if let (Some(t_a), Some(t_b)) = (t1, t2) {
            results.push(Crossing { point, t_a, t_b });
        }
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn arc(cx: f64, cy: f64, radius: f64, start_angle: f64, sweep: f64) -> ArcParams {
        ArcParams {
            center: p(cx, cy),
            radius,
            start_angle,
            sweep,
        }
    }

    #[test]
    fn segment_segment_crossing() {
        let (pt, t, u) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0))
                .unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((pt.y - 1.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_parallel() {
        let hit =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0));
        assert!(hit.is_none());
    }

    #[test]
    fn segment_segment_touching_endpoint() {
        let (pt, t, u) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(1.0, 3.0))
                .unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!(u.abs() < TOLERANCE);
    }

    #[test]
    fn segment_arc_two_crossings() {
        let hits = segment_arc_intersect_2d(&p(-2.0, 0.0), &p(2.0, 0.0), &arc(0.0, 0.0, 1.0, 0.0, PI));
        assert_eq!(hits.len(), 2, "hits={hits:?}");
    }

    #[test]
    fn segment_arc_outside_angular_range() {
        let hits = segment_arc_intersect_2d(
            &p(-2.0, 0.0),
            &p(2.0, 0.0),
            &arc(0.0, 0.0, 1.0, PI / 4.0, PI / 4.0),
        );
        assert!(hits.is_empty(), "hits={hits:?}");
    }

    #[test]
    fn segment_arc_tangent() {
        let hits = segment_arc_intersect_2d(&p(-1.0, 1.0), &p(1.0, 1.0), &arc(0.0, 0.0, 1.0, 0.0, PI));
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!(hits[0].point.x.abs() < 1e-6);
        assert!((hits[0].t_b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn arc_arc_two_crossings() {
        let hits = arc_arc_intersect_2d(
            &arc(0.0, 0.0, 1.0, -PI, 2.0 * PI),
            &arc(1.0, 0.0, 1.0, 0.0, 2.0 * PI),
        );
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        let sqrt3_2 = 3.0_f64.sqrt() / 2.0;
        for h in &hits {
            assert!((h.point.x - 0.5).abs() < 1e-9);
            assert!((h.point.y.abs() - sqrt3_2).abs() < 1e-9);
        }
    }

    #[test]
    fn arc_arc_too_far_apart() {
        let hits =
            arc_arc_intersect_2d(&arc(0.0, 0.0, 1.0, 0.0, PI), &arc(5.0, 0.0, 1.0, 0.0, PI));
        assert!(hits.is_empty());
    }
}
