use crate::geometry::curve::Curve2d;

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a source edge in an arrangement.
    pub struct SourceEdgeId;
}

/// A vertex lying on a source edge at curve parameter `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSplit {
    pub vertex: VertexId,
    pub t: f64,
}

/// A user-supplied curve plus the vertices found on it.
///
/// Splits are kept sorted by strictly increasing `t`; the first split sits
/// at `t = 0` and the last at `t = 1`. Edges are never physically broken:
/// each consecutive split pair becomes one sub-edge at assembly time.
#[derive(Debug, Clone)]
pub struct SourceEdgeData {
    /// The geometric curve of the edge.
    pub curve: Curve2d,
    /// Sorted vertex-on-edge entries.
    pub splits: Vec<EdgeSplit>,
}

impl SourceEdgeData {
    /// Creates an edge whose only splits are its two end vertices.
    ///
    /// For closed curves `start` and `end` are the same vertex.
    #[must_use]
    pub fn new(curve: Curve2d, start: VertexId, end: VertexId) -> Self {
        Self {
            curve,
            splits: vec![
                EdgeSplit {
                    vertex: start,
                    t: 0.0,
                },
                EdgeSplit { vertex: end, t: 1.0 },
            ],
        }
    }

    /// Records `vertex` at parameter `t`, keeping the split list sorted.
    ///
    /// Returns `false` without changing anything if a split already exists
    /// within `param_tolerance` of `t`.
    pub fn add_split(&mut self, vertex: VertexId, t: f64, param_tolerance: f64) -> bool {
        let t = t.clamp(0.0, 1.0);
        if self
            .splits
            .iter()
            .any(|s| (s.t - t).abs() <= param_tolerance)
        {
            return false;
        }
        let at = self.splits.partition_point(|s| s.t < t);
        self.splits.insert(at, EdgeSplit { vertex, t });
        true
    }

    /// Returns `true` if `vertex` is already recorded on this edge.
    #[must_use]
    pub fn has_vertex(&self, vertex: VertexId) -> bool {
        self.splits.iter().any(|s| s.vertex == vertex)
    }

    /// Consecutive split pairs, one per sub-edge.
    pub fn sub_edges(&self) -> impl Iterator<Item = (&EdgeSplit, &EdgeSplit)> {
        self.splits.windows(2).map(|w| (&w[0], &w[1]))
    }
}
