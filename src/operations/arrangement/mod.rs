//! Vertex registry and source-edge store for a planar arrangement.
//!
//! Points are canonicalized into vertices within a snapping tolerance and
//! curves are recorded together with every vertex found on them. Edges are
//! split lazily: [`Arrangement::build`] cuts them into half-edges, traces
//! loops and classifies them.

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::error::{Result, TopologyError};
use crate::geometry::curve::{Arc2d, Circle2d, Curve, Curve2d, Segment2d};
use crate::geometry::pline::Pline;
use crate::geometry::Region;
use crate::math::{Point2, LENGTH_TOLERANCE};
use crate::operations::loop_finder::{assemble_half_edges, classify_loops, trace_loops};
use crate::topology::{LoopGraph, SourceEdgeData, SourceEdgeId, VertexData, VertexId};

/// Parameters controlling snapping, face detection and arc discretization.
#[derive(Debug, Clone, Copy)]
pub struct ArrangementParams {
    /// Distance below which two points are the same vertex, or a point lies
    /// on an edge.
    pub tolerance: f64,
    /// Loops with signed area above this are faces.
    pub area_epsilon: f64,
    /// Maximum deviation of an arc's polyline from the true arc.
    pub chord_tolerance: f64,
    /// Minimum number of chords per arc sub-edge.
    pub min_arc_segments: usize,
    /// Maximum number of chords per arc sub-edge.
    pub max_arc_segments: usize,
}

impl Default for ArrangementParams {
    fn default() -> Self {
        Self {
            tolerance: LENGTH_TOLERANCE,
            area_epsilon: 1e-6,
            chord_tolerance: 0.01,
            min_arc_segments: 4,
            max_arc_segments: 256,
        }
    }
}

impl ArrangementParams {
    /// Sets the snapping tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the face area threshold.
    #[must_use]
    pub fn with_area_epsilon(mut self, area_epsilon: f64) -> Self {
        self.area_epsilon = area_epsilon;
        self
    }

    /// Sets the arc chord tolerance.
    #[must_use]
    pub fn with_chord_tolerance(mut self, chord_tolerance: f64) -> Self {
        self.chord_tolerance = chord_tolerance;
        self
    }

    /// Sets the per-arc chord count bounds.
    #[must_use]
    pub fn with_arc_segments(mut self, min: usize, max: usize) -> Self {
        self.min_arc_segments = min;
        self.max_arc_segments = max.max(min);
        self
    }
}

/// An unordered soup of plan curves being merged into a planar graph.
///
/// `P` is an optional payload attached to vertices by the caller.
#[derive(Debug, Clone)]
pub struct Arrangement<P = ()> {
    vertices: SlotMap<VertexId, VertexData<P>>,
    edges: SlotMap<SourceEdgeId, SourceEdgeData>,
    params: ArrangementParams,
}

impl Arrangement<()> {
    /// Creates an empty arrangement with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(ArrangementParams::default())
    }
}

impl Default for Arrangement<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Arrangement<P> {
    /// Creates an empty arrangement with custom parameters.
    #[must_use]
    pub fn with_params(params: ArrangementParams) -> Self {
        Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            params,
        }
    }

    /// Returns the parameters of this arrangement.
    #[must_use]
    pub fn params(&self) -> &ArrangementParams {
        &self.params
    }

    // --- Vertex registry ---

    /// Canonicalizes `point` into a vertex.
    ///
    /// An existing vertex within tolerance wins. Otherwise, if the point lies
    /// on the interior of one or more edges, a vertex is created at the
    /// projected position and recorded as a split on each of them. Otherwise
    /// a fresh vertex is created.
    pub fn insert_point(&mut self, point: Point2) -> VertexId {
        self.register(point, None)
    }

    /// Like [`Arrangement::insert_point`], attaching `payload` if a new
    /// vertex is created. Snapping to an existing vertex keeps its payload.
    pub fn insert_point_with_payload(&mut self, point: Point2, payload: P) -> VertexId {
        self.register(point, Some(payload))
    }

    /// Returns the nearest vertex within tolerance of `point`.
    #[must_use]
    pub fn find_vertex(&self, point: &Point2) -> Option<VertexId> {
        let tol = self.params.tolerance;
        self.vertices
            .iter()
            .map(|(id, v)| (id, (v.point - point).norm()))
            .filter(|(_, d)| *d <= tol)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn register(&mut self, point: Point2, payload: Option<P>) -> VertexId {
        if let Some(existing) = self.find_vertex(&point) {
            return existing;
        }

        let tol = self.params.tolerance;
        let hits: Vec<(SourceEdgeId, f64, Point2)> = self
            .edges
            .iter()
            .filter_map(|(id, edge)| {
                let ptol = param_tolerance(&edge.curve, tol);
                let proj = edge.curve.project(&point);
                let interior = edge.curve.is_closed() || (proj.t > ptol && proj.t < 1.0 - ptol);
                (proj.distance <= tol && interior).then_some((id, proj.t, proj.point))
            })
            .collect();

        let position = hits.first().map_or(point, |h| h.2);
        let id = self.vertices.insert(VertexData {
            point: position,
            payload,
        });

        for (edge_id, t, _) in hits {
            if let Some(edge) = self.edges.get_mut(edge_id) {
                let ptol = param_tolerance(&edge.curve, tol);
                if edge.add_split(id, t, ptol) {
                    trace!(?edge_id, t, "point splits existing edge");
                }
            }
        }
        id
    }

    // --- Edge insertion ---

    /// Inserts a curve, splitting it (and existing edges) at every crossing
    /// and at every existing vertex lying on it.
    pub fn insert_curve(&mut self, curve: Curve2d) -> SourceEdgeId {
        let tol = self.params.tolerance;
        let ptol = param_tolerance(&curve, tol);

        let start = self.insert_point(curve.start());
        let end = if curve.is_closed() {
            start
        } else {
            self.insert_point(curve.end())
        };
        let mut data = SourceEdgeData::new(curve, start, end);

        let crossings: Vec<_> = self
            .edges
            .values()
            .flat_map(|other| curve.intersect(&other.curve))
            .collect();
        for crossing in crossings {
            let v = self.insert_point(crossing.point);
            if !data.has_vertex(v) {
                data.add_split(v, crossing.t_a, ptol);
            }
        }

        // Existing vertices on the new curve (T-junctions and overlaps).
        for (id, vertex) in &self.vertices {
            if data.has_vertex(id) {
                continue;
            }
            let proj = curve.project(&vertex.point);
            if proj.distance <= tol {
                data.add_split(id, proj.t, ptol);
            }
        }

        let id = self.edges.insert(data);
        trace!(?id, splits = self.edges[id].splits.len(), "inserted curve");
        id
    }

    /// Inserts a straight wall between two points.
    pub fn insert_segment(&mut self, a: Point2, b: Point2) -> SourceEdgeId {
        self.insert_curve(Segment2d::new(a, b).into())
    }

    /// Inserts a circular arc.
    pub fn insert_arc(&mut self, arc: Arc2d) -> SourceEdgeId {
        self.insert_curve(arc.into())
    }

    /// Inserts a full circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn insert_circle(&mut self, center: Point2, radius: f64) -> Result<SourceEdgeId> {
        Ok(self.insert_curve(Circle2d::new(center, radius)?.into()))
    }

    /// Inserts a straight polyline; `closed` adds the wall back to the start.
    pub fn insert_path(&mut self, points: &[Point2], closed: bool) -> Vec<SourceEdgeId> {
        self.insert_bulge_path(&Pline::from_points(points, closed))
    }

    /// Inserts every span of a bulge-encoded path.
    pub fn insert_bulge_path(&mut self, pline: &Pline) -> Vec<SourceEdgeId> {
        pline
            .to_curves()
            .into_iter()
            .map(|c| self.insert_curve(c))
            .collect()
    }

    // --- Lookups ---

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn vertex(&self, id: VertexId) -> std::result::Result<&VertexData<P>, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Iterates over all registered vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData<P>)> {
        self.vertices.iter()
    }

    /// Returns a reference to the source edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn source_edge(
        &self,
        id: SourceEdgeId,
    ) -> std::result::Result<&SourceEdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("source edge".into()))
    }

    /// Iterates over all source edges.
    pub fn source_edges(&self) -> impl Iterator<Item = (SourceEdgeId, &SourceEdgeData)> {
        self.edges.iter()
    }

    // --- Build ---

    /// Assembles half-edges, traces every loop and classifies them.
    ///
    /// # Errors
    ///
    /// Returns a [`TopologyError`] if a structural invariant breaks during
    /// assembly or traversal. Messy geometry is reported through the graph's
    /// diagnostics instead.
    pub fn build(&self) -> Result<LoopGraph<P>>
    where
        P: Clone,
    {
        let mut graph = self.unbuilt_graph();
        assemble_half_edges(&mut graph, &self.params)?;
        trace_loops(&mut graph)?;
        classify_loops(&mut graph, &self.params)?;

        debug!(
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            half_edges = graph.half_edge_count(),
            loops = graph.loops().count(),
            faces = graph.face_loops().count(),
            "arrangement built"
        );
        Ok(graph)
    }

    /// A graph over the current vertices and source edges with no
    /// half-edges yet.
    pub(crate) fn unbuilt_graph(&self) -> LoopGraph<P>
    where
        P: Clone,
    {
        LoopGraph::new(self.vertices.clone(), self.edges.clone())
    }

    /// Builds the graph and returns its regions.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails.
    pub fn regions(&self) -> Result<Vec<Region>>
    where
        P: Clone,
    {
        Ok(self.build()?.regions())
    }
}

/// Converts a distance tolerance to a parameter tolerance on `curve`.
fn param_tolerance(curve: &Curve2d, tol: f64) -> f64 {
    let length = curve.length();
    if length > tol {
        tol / length
    } else {
        tol
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::pline::PlineVertex;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn snapping_is_idempotent() {
        let mut arr = Arrangement::new();
        let a = arr.insert_point(p(1.0, 1.0));
        let b = arr.insert_point(p(1.0 + 1e-7, 1.0 - 1e-7));
        let c = arr.insert_point(p(1.0, 1.0));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(arr.vertices().count(), 1);
    }

    #[test]
    fn snapping_is_order_independent() {
        let pts = [p(0.0, 0.0), p(5.0, 5.0), p(0.0, 1e-8)];
        let mut fwd = Arrangement::new();
        let ids: Vec<_> = pts.iter().map(|q| fwd.insert_point(*q)).collect();
        assert_eq!(ids[0], ids[2]);

        let mut rev = Arrangement::new();
        let ids: Vec<_> = pts.iter().rev().map(|q| rev.insert_point(*q)).collect();
        assert_eq!(ids[0], ids[2]);
        assert_eq!(fwd.vertices().count(), rev.vertices().count());
    }

    #[test]
    fn point_on_edge_records_split() {
        let mut arr = Arrangement::new();
        let e = arr.insert_segment(p(0.0, 0.0), p(10.0, 0.0));
        let v = arr.insert_point(p(4.0, 1e-7));
        let edge = arr.source_edge(e).unwrap();
        assert_eq!(edge.splits.len(), 3);
        assert_eq!(edge.splits[1].vertex, v);
        assert!((edge.splits[1].t - 0.4).abs() < 1e-9);
        // The vertex sits on the edge, not at the raw input.
        assert!(arr.vertex(v).unwrap().point.y.abs() < 1e-12);
    }

    #[test]
    fn vertex_snap_beats_edge_split() {
        let mut arr = Arrangement::new();
        let e = arr.insert_segment(p(0.0, 0.0), p(10.0, 0.0));
        let corner = arr.find_vertex(&p(10.0, 0.0)).unwrap();
        let v = arr.insert_point(p(10.0 - 5e-7, 1e-7));
        assert_eq!(v, corner);
        assert_eq!(arr.source_edge(e).unwrap().splits.len(), 2);
    }

    #[test]
    fn crossing_segments_split_each_other() {
        let mut arr = Arrangement::new();
        let a = arr.insert_segment(p(0.0, 5.0), p(10.0, 5.0));
        let b = arr.insert_segment(p(5.0, 0.0), p(5.0, 10.0));
        assert_eq!(arr.source_edge(a).unwrap().splits.len(), 3);
        assert_eq!(arr.source_edge(b).unwrap().splits.len(), 3);
        let mid_a = arr.source_edge(a).unwrap().splits[1].vertex;
        let mid_b = arr.source_edge(b).unwrap().splits[1].vertex;
        assert_eq!(mid_a, mid_b);
        assert_eq!(arr.vertices().count(), 5);
    }

    #[test]
    fn t_junction_splits_through_wall() {
        let mut arr = Arrangement::new();
        let wall = arr.insert_segment(p(0.0, 0.0), p(10.0, 0.0));
        arr.insert_segment(p(3.0, 0.0), p(3.0, 4.0));
        let splits = &arr.source_edge(wall).unwrap().splits;
        assert_eq!(splits.len(), 3);
        assert!((splits[1].t - 0.3).abs() < 1e-12);
    }

    #[test]
    fn existing_vertex_on_new_curve_is_recorded() {
        let mut arr = Arrangement::new();
        let v = arr.insert_point(p(2.0, 0.0));
        let e = arr.insert_segment(p(0.0, 0.0), p(8.0, 0.0));
        let splits = &arr.source_edge(e).unwrap().splits;
        assert_eq!(splits.len(), 3);
        assert_eq!(splits[1].vertex, v);
    }

    #[test]
    fn circle_splits_share_one_vertex() {
        let mut arr = Arrangement::new();
        let e = arr.insert_circle(p(0.0, 0.0), 1.0).unwrap();
        let splits = &arr.source_edge(e).unwrap().splits;
        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].vertex, splits[1].vertex);
    }

    #[test]
    fn payload_kept_on_first_insertion() {
        let mut arr: Arrangement<&str> = Arrangement::with_params(ArrangementParams::default());
        let a = arr.insert_point_with_payload(p(0.0, 0.0), "door");
        let b = arr.insert_point_with_payload(p(0.0, 0.0), "window");
        assert_eq!(a, b);
        assert_eq!(arr.vertex(a).unwrap().payload, Some("door"));
    }

    #[test]
    fn closed_path_shares_corners() {
        let mut arr = Arrangement::new();
        let edges = arr.insert_path(&[p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0), p(0.0, 3.0)], true);
        assert_eq!(edges.len(), 4);
        assert_eq!(arr.vertices().count(), 4);
    }

    #[test]
    fn bulge_path_inserts_arcs() {
        let mut arr = Arrangement::new();
        let pline = Pline {
            vertices: vec![PlineVertex::new(0.0, 0.0, 1.0), PlineVertex::line(2.0, 0.0)],
            closed: true,
        };
        let edges = arr.insert_bulge_path(&pline);
        assert_eq!(edges.len(), 2);
        let first = arr.source_edge(edges[0]).unwrap();
        assert!(matches!(first.curve, Curve2d::Arc(_)));
    }
}
