use i_overlay::core::overlay::Overlay;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::i_shape::int::shape::{IntContour, IntShape};
use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::Region;
use crate::math::polygon_2d::signed_area_2d;

use super::scale::{from_contour, to_contours};
use super::select::{BooleanOp, PolygonFillRule};

/// Settings for a polygon boolean operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BooleanParams {
    /// Grid resolution: coordinates are rounded to multiples of `1 / scale`
    /// and the overlay computes on that integer grid.
    pub scale: f64,
    /// Output outers and holes with a smaller area are discarded.
    pub min_area: f64,
    pub subject_fill: PolygonFillRule,
    pub clip_fill: PolygonFillRule,
}

impl Default for BooleanParams {
    fn default() -> Self {
        Self {
            scale: 1e6,
            min_area: 1e-6,
            subject_fill: PolygonFillRule::EvenOdd,
            clip_fill: PolygonFillRule::EvenOdd,
        }
    }
}

impl BooleanParams {
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    #[must_use]
    pub fn with_subject_fill(mut self, fill: PolygonFillRule) -> Self {
        self.subject_fill = fill;
        self
    }

    #[must_use]
    pub fn with_clip_fill(mut self, fill: PolygonFillRule) -> Self {
        self.clip_fill = fill;
        self
    }
}

/// Runs a boolean operation on two sets of regions.
///
/// Coordinates are converted to `i32` units of `1 / scale` and the overlay
/// runs on those integers. Input rings keep their winding as given, which
/// only matters for the `Positive` and `Negative` fill rules. The result is
/// normalized.
///
/// # Errors
///
/// Returns [`OperationError::InvalidInput`] for a non-positive scale and
/// [`OperationError::CoordinateOverflow`] if a coordinate does not fit the
/// integer grid.
pub fn boolean_execute(
    subject: &[Region],
    clip: &[Region],
    op: BooleanOp,
    params: &BooleanParams,
) -> Result<Vec<Region>> {
    if !(params.scale.is_finite() && params.scale > 0.0) {
        return Err(OperationError::InvalidInput(format!(
            "boolean scale must be positive, got {}",
            params.scale
        ))
        .into());
    }

    let mut subj = to_contours(subject, params.scale)?;
    let mut clip = to_contours(clip, params.scale)?;

    let fill = if params.subject_fill == params.clip_fill {
        params.subject_fill
    } else {
        // Resolve each operand under its own rule first; the results are
        // simple and consistently wound, so NonZero combines them.
        subj = self_union(&subj, params.subject_fill);
        clip = self_union(&clip, params.clip_fill);
        PolygonFillRule::NonZero
    };

    let shapes =
        Overlay::with_contours(&subj, &clip).overlay(op.overlay_rule(), fill.fill_rule());
    let result = collect_regions(shapes, params);
    debug!(?op, regions = result.len(), "boolean done");
    Ok(result)
}

fn self_union(contours: &[IntContour], fill: PolygonFillRule) -> Vec<IntContour> {
    Overlay::with_contours(contours, &[])
        .overlay(OverlayRule::Subject, fill.fill_rule())
        .into_iter()
        .flatten()
        .collect()
}

/// Converts overlay shapes (outer first, then holes) into filtered,
/// normalized regions.
fn collect_regions(shapes: Vec<IntShape>, params: &BooleanParams) -> Vec<Region> {
    let mut regions = Vec::with_capacity(shapes.len());
    for shape in shapes {
        let mut rings = shape.iter();
        let Some(outer) = rings.next() else {
            continue;
        };
        let outer = from_contour(outer, params.scale);
        let outer_area = signed_area_2d(&outer).abs();
        if outer.len() < 3 || outer_area < params.min_area {
            debug!(area = outer_area, "dropping sliver face");
            continue;
        }

        let mut holes = Vec::new();
        for hole in rings {
            let hole = from_contour(hole, params.scale);
            let hole_area = signed_area_2d(&hole).abs();
            if hole.len() < 3 || hole_area < params.min_area {
                debug!(area = hole_area, "dropping sliver hole");
                continue;
            }
            holes.push(hole);
        }
        regions.push(Region::new(outer, holes).normalized());
    }
    regions
}
