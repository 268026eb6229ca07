use crate::error::Result;
use crate::geometry::Region;

use super::engine::{boolean_execute, BooleanParams};
use super::select::BooleanOp;

/// Removes the clip regions from the subject regions.
pub struct Subtract<'a> {
    subject: &'a [Region],
    clip: &'a [Region],
    params: BooleanParams,
}

impl<'a> Subtract<'a> {
    /// Creates a new `Subtract` operation with default parameters.
    #[must_use]
    pub fn new(subject: &'a [Region], clip: &'a [Region]) -> Self {
        Self {
            subject,
            clip,
            params: BooleanParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: BooleanParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate overflows the integer grid.
    pub fn execute(&self) -> Result<Vec<Region>> {
        boolean_execute(self.subject, self.clip, BooleanOp::Difference, &self.params)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn cutting_through_splits_the_subject() {
        let slab = Region::from_outline(vec![
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(6.0, 2.0),
            Point2::new(0.0, 2.0),
        ]);
        let cut = Region::from_outline(vec![
            Point2::new(2.0, -1.0),
            Point2::new(3.0, -1.0),
            Point2::new(3.0, 3.0),
            Point2::new(2.0, 3.0),
        ]);
        let pieces = Subtract::new(&[slab], &[cut]).execute().unwrap();
        assert_eq!(pieces.len(), 2);
        let total: f64 = pieces.iter().map(Region::area).sum();
        assert!((total - 10.0).abs() < 1e-9);
    }
}
