use tracing::debug;

use crate::error::Result;
use crate::geometry::{point_in_regions, Curve2d, Region};
use crate::operations::arrangement::{Arrangement, ArrangementParams};
use crate::tessellation::TessellateRegion;

/// Overlays two curve sets and keeps the faces covered by both region sets.
pub struct IntersectArrangements<'a> {
    a_curves: &'a [Curve2d],
    a_regions: &'a [Region],
    b_curves: &'a [Curve2d],
    b_regions: &'a [Region],
    params: ArrangementParams,
}

impl<'a> IntersectArrangements<'a> {
    /// Creates a new `IntersectArrangements` operation.
    #[must_use]
    pub fn new(
        a_curves: &'a [Curve2d],
        a_regions: &'a [Region],
        b_curves: &'a [Curve2d],
        b_regions: &'a [Region],
        params: ArrangementParams,
    ) -> Self {
        Self {
            a_curves,
            a_regions,
            b_curves,
            b_regions,
            params,
        }
    }

    /// Executes the operation.
    ///
    /// Each face of the combined arrangement is sampled at an interior point;
    /// faces inside both region lists are returned with their holes.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined arrangement fails to build or a face
    /// cannot be triangulated.
    pub fn execute(&self) -> Result<Vec<Region>> {
        let mut arrangement: Arrangement = Arrangement::with_params(self.params);
        for curve in self.a_curves.iter().chain(self.b_curves) {
            arrangement.insert_curve(*curve);
        }

        let tol = self.params.tolerance;
        let mut kept = Vec::new();
        let faces = arrangement.regions()?;
        let total = faces.len();
        for face in faces {
            let sample = TessellateRegion::new(&face).interior_point()?;
            if point_in_regions(&sample, self.a_regions, tol)
                && point_in_regions(&sample, self.b_regions, tol)
            {
                kept.push(face);
            }
        }
        debug!(faces = total, kept = kept.len(), "intersected arrangements");
        Ok(kept)
    }
}

/// Shortcut for [`IntersectArrangements::execute`].
///
/// # Errors
///
/// See [`IntersectArrangements::execute`].
pub fn intersect_arrangements(
    a_curves: &[Curve2d],
    a_regions: &[Region],
    b_curves: &[Curve2d],
    b_regions: &[Region],
    params: ArrangementParams,
) -> Result<Vec<Region>> {
    IntersectArrangements::new(a_curves, a_regions, b_curves, b_regions, params).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Pline;
    use crate::math::Point2;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Curve2d> {
        Pline::from_points(
            &[
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ],
            true,
        )
        .to_curves()
    }

    fn regions_of(curves: &[Curve2d]) -> Vec<Region> {
        let mut arr = Arrangement::new();
        for c in curves {
            arr.insert_curve(*c);
        }
        arr.regions().unwrap()
    }

    #[test]
    fn overlapping_squares_keep_the_shared_cell() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        let b = square(1.0, 1.0, 3.0, 3.0);
        let params = ArrangementParams::default();
        let result = intersect_arrangements(&a, &regions_of(&a), &b, &regions_of(&b), params).unwrap();
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_squares_share_nothing() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(5.0, 5.0, 6.0, 6.0);
        let params = ArrangementParams::default();
        let result = intersect_arrangements(&a, &regions_of(&a), &b, &regions_of(&b), params).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn column_inside_both_is_kept_as_a_face() {
        let a = square(0.0, 0.0, 4.0, 4.0);
        let b = square(2.0, 0.0, 6.0, 4.0);
        let mut both = a.clone();
        both.extend(square(2.5, 1.5, 3.5, 2.5));
        let result = intersect_arrangements(
            &both,
            &regions_of(&a),
            &b,
            &regions_of(&b),
            ArrangementParams::default(),
        )
        .unwrap();
        let total: f64 = result.iter().map(Region::area).sum();
        assert!((total - 8.0).abs() < 1e-9);
        assert_eq!(result.len(), 2);
    }
}
