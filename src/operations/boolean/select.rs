use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    /// Subject minus clip.
    Difference,
    Intersection,
    /// Area covered by exactly one operand.
    Xor,
}

impl BooleanOp {
    pub(crate) fn overlay_rule(self) -> OverlayRule {
        match self {
            Self::Union => OverlayRule::Union,
            Self::Difference => OverlayRule::Difference,
            Self::Intersection => OverlayRule::Intersect,
            Self::Xor => OverlayRule::Xor,
        }
    }
}

/// How an operand's rings decide which areas are filled.
///
/// Matters only for self-overlapping input: `EvenOdd` hollows out areas
/// covered twice, `NonZero` keeps them filled, `Positive` and `Negative`
/// keep only areas wound counter-clockwise or clockwise respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonFillRule {
    #[default]
    EvenOdd,
    NonZero,
    Positive,
    Negative,
}

impl PolygonFillRule {
    pub(crate) fn fill_rule(self) -> FillRule {
        match self {
            Self::EvenOdd => FillRule::EvenOdd,
            Self::NonZero => FillRule::NonZero,
            Self::Positive => FillRule::Positive,
            Self::Negative => FillRule::Negative,
        }
    }
}
