use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in an arrangement.
    pub struct VertexId;
}

/// A canonical plan point, optionally tagged with caller data.
///
/// Created once by the vertex registry and never moved afterwards.
#[derive(Debug, Clone)]
pub struct VertexData<P = ()> {
    /// The 2D position of the vertex.
    pub point: Point2,
    /// Caller payload attached on first insertion.
    pub payload: Option<P>,
}
