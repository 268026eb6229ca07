use crate::error::Result;
use crate::geometry::Region;
use crate::operations::boolean::{BooleanParams, Intersect};

/// Computes the area shared by two regions.
pub struct OverlapArea<'a> {
    a: &'a Region,
    b: &'a Region,
    params: BooleanParams,
}

impl<'a> OverlapArea<'a> {
    /// Creates a new `OverlapArea` query with default boolean parameters.
    #[must_use]
    pub fn new(a: &'a Region, b: &'a Region) -> Self {
        Self {
            a,
            b,
            params: BooleanParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: BooleanParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the overlap area (zero when disjoint).
    ///
    /// # Errors
    ///
    /// Returns an error if the boolean intersection fails.
    pub fn execute(&self) -> Result<f64> {
        let shared = Intersect::new(std::slice::from_ref(self.a), std::slice::from_ref(self.b))
            .with_params(self.params)
            .execute()?;
        Ok(shared.iter().map(Region::area).sum())
    }
}

/// Area shared by `a` and `b`, with default boolean parameters.
///
/// # Errors
///
/// Returns an error if the boolean intersection fails.
pub fn overlap_area(a: &Region, b: &Region) -> Result<f64> {
    OverlapArea::new(a, b).execute()
}
