pub mod curve;
pub mod pline;
pub mod region;

pub use curve::{Arc2d, Circle2d, Curve, Curve2d, Segment2d};
pub use pline::{Pline, PlineVertex};
pub use region::{point_in_regions, Region};
