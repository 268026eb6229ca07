//! Polygon booleans on regions, evaluated on an integer grid.

mod engine;
mod intersect_op;
mod scale;
mod select;
mod subtract;
mod union;
mod xor;

pub use engine::{boolean_execute, BooleanParams};
pub use intersect_op::Intersect;
pub use select::{BooleanOp, PolygonFillRule};
pub use subtract::Subtract;
pub use union::Union;
pub use xor::SymmetricDifference;
