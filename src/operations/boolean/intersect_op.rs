use crate::error::Result;
use crate::geometry::Region;

use super::engine::{boolean_execute, BooleanParams};
use super::select::BooleanOp;

/// Computes the area covered by both sets of regions.
pub struct Intersect<'a> {
    subject: &'a [Region],
    clip: &'a [Region],
    params: BooleanParams,
}

impl<'a> Intersect<'a> {
    /// Creates a new `Intersect` operation with default parameters.
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
        boolean_execute(self.subject, self.clip, BooleanOp::Intersection, &self.params)
    }
}
