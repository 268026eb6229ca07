pub mod arc_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Arithmetic zero threshold for cross products and vector lengths.
pub const TOLERANCE: f64 = 1e-10;

/// Default snapping distance between two points considered the same vertex.
pub const LENGTH_TOLERANCE: f64 = 1e-6;

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Normalizes an angle to `[0, 2pi)`.
#[must_use]
pub fn normalize_angle(a: f64) -> f64 {
    let two_pi = std::f64::consts::TAU;
    let mut r = a % two_pi;
    if r < 0.0 {
        r += two_pi;
    }
    r
}

/// Returns the unit vector along `v`, or `None` for a zero vector.
#[must_use]
pub fn unit(v: Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < TOLERANCE {
        None
    } else {
        Some(v / len)
    }
}
