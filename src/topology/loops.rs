use crate::math::Point2;

use super::half_edge::HalfEdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a traced loop.
    pub struct LoopId;
}

/// Orientation class of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// Counter-clockwise loop with area above the epsilon: an enclosed face.
    Face,
    /// Clockwise or zero-area loop: the outside of a connected component.
    Bounding,
}

/// Which kinds of loops lie on the two sides of a sub-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    /// Faces on both sides: a wall between two rooms.
    Interior,
    /// A face on one side and a bounding loop on the other.
    Perimeter,
    /// Bounding loops on both sides: a dangling or free-standing wall.
    Isolated,
}

/// A closed cycle of half-edges found by the angular traversal.
#[derive(Debug, Clone)]
pub struct LoopData {
    /// Half-edges in traversal order; `next` of the last is the first.
    pub half_edges: Vec<HalfEdgeId>,
    /// Concatenated discretized points, without the closing duplicate.
    pub points: Vec<Point2>,
    /// Signed shoelace area (positive = counter-clockwise).
    pub area: f64,
    pub kind: LoopKind,
    /// Smallest face loop that strictly contains this one.
    pub parent: Option<LoopId>,
    pub children: Vec<LoopId>,
    /// `false` if the outline crosses itself.
    pub valid: bool,
    /// Region outline with dead-end spikes removed.
    pub outline: Vec<Point2>,
}

impl LoopData {
    /// Creates an unclassified loop.
    #[must_use]
    pub fn new(half_edges: Vec<HalfEdgeId>, points: Vec<Point2>, area: f64) -> Self {
        Self {
            half_edges,
            points,
            area,
            kind: LoopKind::Bounding,
            parent: None,
            children: Vec::new(),
            valid: true,
            outline: Vec::new(),
        }
    }

    /// Returns `true` for a counter-clockwise face loop.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.kind == LoopKind::Face
    }

    /// Returns `true` for a clockwise loop with real area.
    #[must_use]
    pub fn is_cw(&self) -> bool {
        self.kind == LoopKind::Bounding && self.area < 0.0
    }

    /// Returns `true` for any loop that does not enclose a face.
    #[must_use]
    pub fn is_bound_loop(&self) -> bool {
        self.kind == LoopKind::Bounding
    }
}
