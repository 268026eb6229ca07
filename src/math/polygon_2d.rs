use super::distance_2d::point_to_segment_dist;
use super::intersect_2d::segment_segment_intersect_2d;
use super::{Point2, TOLERANCE};

/// Position of a point relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    OnBoundary,
    Outside,
}

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    if best == 0 {
        return points.to_vec();
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Returns a copy of the polygon wound in the requested direction.
#[must_use]
pub fn with_orientation(points: &[Point2], ccw: bool) -> Vec<Point2> {
    let area = signed_area_2d(points);
    if (area > 0.0) == ccw || area == 0.0 {
        points.to_vec()
    } else {
        points.iter().rev().copied().collect()
    }
}

/// Drops consecutive points closer than `tol`, including the closing
/// duplicate of the first point.
#[must_use]
pub fn dedup_points(points: &[Point2], tol: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().is_some_and(|q| (p - q).norm() <= tol) {
            continue;
        }
        out.push(p);
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() <= tol {
        out.pop();
    }
    out
}

/// Classifies a point against a closed polygon.
///
/// Points within `tol` of any polygon edge are reported as on the boundary;
/// the rest are decided by the even-odd crossing rule.
#[must_use]
pub fn locate_point(point: &Point2, polygon: &[Point2], tol: f64) -> PointLocation {
    let n = polygon.len();
    if n < 3 {
        return PointLocation::Outside;
    }

    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if point_to_segment_dist(point, &a, &b) <= tol {
            return PointLocation::OnBoundary;
        }
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }

    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}

/// Returns `true` if two non-adjacent edges of the closed polygon cross or
/// touch.
///
/// A vertex landing on the interior of another edge counts. Two edges meeting
/// end to end do not: a loop that revisits a vertex (two rooms meeting at a
/// corner) is still simple enough.
#[must_use]
pub fn polygon_self_intersects(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }

    let eps = TOLERANCE * 100.0;
    for i in 0..n {
        let a0 = points[i];
        let a1 = points[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = points[j];
            let b1 = points[(j + 1) % n];
            if let Some((_, t, u)) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1) {
                let t_at_end = t < eps || t > 1.0 - eps;
                let u_at_end = u < eps || u > 1.0 - eps;
                // Only a vertex shared by both edges is allowed.
                if !(t_at_end && u_at_end) {
                    return true;
                }
            }
        }
    }
    false
}
