pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{PlanformError, Result};
pub use geometry::{point_in_regions, Curve2d, Pline, Region};
pub use operations::arrangement::{Arrangement, ArrangementParams};
pub use operations::boolean::{boolean_execute, BooleanOp, BooleanParams, PolygonFillRule};
pub use topology::LoopGraph;
