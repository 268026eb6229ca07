use crate::math::{Point2, Vector2};

use super::edge::SourceEdgeId;
use super::loops::LoopId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a directed half-edge.
    pub struct HalfEdgeId;
}

/// Circle data carried by half-edges cut from arcs and circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcInfo {
    pub center: Point2,
    pub radius: f64,
    /// Traversal direction of this half-edge around `center`.
    pub ccw: bool,
}

/// One directed side of a sub-edge.
///
/// Every half-edge has a partner running the opposite way over the same
/// sub-edge; `partner(partner(h)) == h` always holds.
#[derive(Debug, Clone)]
pub struct HalfEdgeData {
    pub from: VertexId,
    pub to: VertexId,
    /// Source edge this half-edge was cut from.
    pub edge: SourceEdgeId,
    pub t_from: f64,
    pub t_to: f64,
    /// Unit tangent leaving `from`.
    pub direction_from: Vector2,
    /// Unit tangent arriving at `to`.
    pub direction_to: Vector2,
    pub arc: Option<ArcInfo>,
    /// Discretized path from `from` to `to`, both ends included.
    pub points: Vec<Point2>,
    pub partner: HalfEdgeId,
    pub next: Option<HalfEdgeId>,
    pub prev: Option<HalfEdgeId>,
    pub loop_id: Option<LoopId>,
    /// `true` if this half-edge runs against the source curve's parameter.
    pub reversed: bool,
}

impl HalfEdgeData {
    /// Returns `true` for a closed sub-edge that starts and ends on one vertex.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Direction from the start vertex towards the first interior sample,
    /// used to separate half-edges that leave a vertex with equal tangents.
    #[must_use]
    pub fn chord_direction(&self) -> Vector2 {
        match self.points.as_slice() {
            [first, second, ..] => second - first,
            _ => self.direction_from,
        }
    }
}
