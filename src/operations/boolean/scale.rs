use i_overlay::i_float::int::point::IntPoint;
use i_overlay::i_shape::int::shape::IntContour;

use crate::error::{OperationError, Result};
use crate::geometry::Region;
use crate::math::Point2;

/// Converts `value` to integer grid units of `1 / scale`.
///
/// # Errors
///
/// Returns [`OperationError::CoordinateOverflow`] if the scaled value does
/// not fit in an `i32`.
#[allow(clippy::cast_possible_truncation)]
pub fn to_grid(value: f64, scale: f64) -> Result<i32> {
    let scaled = (value * scale).round();
    if !scaled.is_finite() || scaled.abs() > f64::from(i32::MAX) {
        return Err(OperationError::CoordinateOverflow { value, scale }.into());
    }
    Ok(scaled as i32)
}

/// Flattens regions into integer contours (outer rings and holes alike).
///
/// Rings that collapse below three points on the grid are skipped.
pub fn to_contours(regions: &[Region], scale: f64) -> Result<Vec<IntContour>> {
    let mut contours = Vec::new();
    for region in regions {
        for ring in std::iter::once(&region.outer).chain(region.holes.iter()) {
            let mut contour: IntContour = Vec::with_capacity(ring.len());
            for p in ring {
                let q = IntPoint::new(to_grid(p.x, scale)?, to_grid(p.y, scale)?);
                if contour.last() != Some(&q) {
                    contour.push(q);
                }
            }
            if contour.len() > 1 && contour.first() == contour.last() {
                contour.pop();
            }
            if contour.len() >= 3 {
                contours.push(contour);
            }
        }
    }
    Ok(contours)
}

/// Converts an overlay contour back to plan points.
pub fn from_contour(contour: &[IntPoint], scale: f64) -> Vec<Point2> {
    contour
        .iter()
        .map(|p| Point2::new(f64::from(p.x) / scale, f64::from(p.y) / scale))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn grid_rounds_to_nearest_unit() {
        assert_eq!(to_grid(1.234_567_89, 1e3).unwrap(), 1235);
        assert_eq!(to_grid(-0.000_4, 1e3).unwrap(), 0);
    }

    #[test]
    fn grid_overflow_is_an_error() {
        assert!(to_grid(1e4, 1e6).is_err());
        assert!(to_grid(f64::NAN, 1.0).is_err());
        assert_eq!(to_grid(1e4, 1e3).unwrap(), 10_000_000);
    }

    #[test]
    fn contours_drop_collapsed_rings() {
        let region = Region::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
            vec![vec![
                Point2::new(0.5, 0.5),
                Point2::new(0.500_000_1, 0.5),
                Point2::new(0.5, 0.500_000_1),
            ]],
        );
        let contours = to_contours(&[region], 1e3).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0][1], IntPoint::new(1000, 0));
    }

    #[test]
    fn contour_round_trip_lands_on_grid() {
        let back = from_contour(&[IntPoint::new(1500, -250)], 1e3);
        assert!((back[0] - Point2::new(1.5, -0.25)).norm() < 1e-12);
    }
}
