mod intersect;
mod overlap;

pub use intersect::{intersect_arrangements, IntersectArrangements};
pub use overlap::{overlap_area, OverlapArea};
