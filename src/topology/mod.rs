pub mod edge;
pub mod half_edge;
pub mod loops;
pub mod vertex;

pub use edge::{EdgeSplit, SourceEdgeData, SourceEdgeId};
pub use half_edge::{ArcInfo, HalfEdgeData, HalfEdgeId};
pub use loops::{EdgeSide, LoopData, LoopId, LoopKind};
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use crate::geometry::Region;
use slotmap::SlotMap;

/// The result of an arrangement build: vertices, source edges, the
/// half-edge graph and every traced loop.
///
/// Entities reference each other via typed IDs (generational indices).
/// A graph is built once and then only read.
#[derive(Debug, Clone)]
pub struct LoopGraph<P = ()> {
    vertices: SlotMap<VertexId, VertexData<P>>,
    edges: SlotMap<SourceEdgeId, SourceEdgeData>,
    half_edges: SlotMap<HalfEdgeId, HalfEdgeData>,
    loops: SlotMap<LoopId, LoopData>,
    degenerate_edges: Vec<SourceEdgeId>,
    unclosed_half_edges: Vec<HalfEdgeId>,
}

impl<P> LoopGraph<P> {
    /// Creates a graph over registered vertices and source edges, with no
    /// half-edges or loops yet.
    #[must_use]
    pub(crate) fn new(
        vertices: SlotMap<VertexId, VertexData<P>>,
        edges: SlotMap<SourceEdgeId, SourceEdgeData>,
    ) -> Self {
        Self {
            vertices,
            edges,
            half_edges: SlotMap::with_key(),
            loops: SlotMap::with_key(),
            degenerate_edges: Vec::new(),
            unclosed_half_edges: Vec::new(),
        }
    }

    // --- Vertex operations ---

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData<P>, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData<P>)> {
        self.vertices.iter()
    }

    // --- Source edge operations ---

    /// Returns a reference to the source edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn source_edge(&self, id: SourceEdgeId) -> Result<&SourceEdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("source edge".into()))
    }

    /// Iterates over all source edges.
    pub fn source_edges(&self) -> impl Iterator<Item = (SourceEdgeId, &SourceEdgeData)> {
        self.edges.iter()
    }

    // --- Half-edge operations ---

    /// Inserts two mutually partnered half-edges and returns their IDs.
    ///
    /// The `partner` fields of the arguments are overwritten.
    pub(crate) fn add_half_edge_pair(
        &mut self,
        forward: HalfEdgeData,
        mut reverse: HalfEdgeData,
    ) -> (HalfEdgeId, HalfEdgeId) {
        let f = self.half_edges.insert(forward);
        reverse.partner = f;
        let r = self.half_edges.insert(reverse);
        if let Some(fwd) = self.half_edges.get_mut(f) {
            fwd.partner = r;
        }
        (f, r)
    }

    /// Returns a reference to the half-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn half_edge(&self, id: HalfEdgeId) -> Result<&HalfEdgeData, TopologyError> {
        self.half_edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()))
    }

    /// Returns a mutable reference to the half-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub(crate) fn half_edge_mut(
        &mut self,
        id: HalfEdgeId,
    ) -> Result<&mut HalfEdgeData, TopologyError> {
        self.half_edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()))
    }

    /// Iterates over all half-edges in arena order.
    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdgeData)> {
        self.half_edges.iter()
    }

    /// Number of half-edges in the graph (always even).
    #[must_use]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Returns the partner of a half-edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge is not found.
    pub fn partner(&self, id: HalfEdgeId) -> Result<HalfEdgeId, TopologyError> {
        Ok(self.half_edge(id)?.partner)
    }

    // --- Loop operations ---

    /// Inserts a loop and returns its ID.
    pub(crate) fn add_loop(&mut self, data: LoopData) -> LoopId {
        self.loops.insert(data)
    }

    /// Returns a reference to the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn loop_data(&self, id: LoopId) -> Result<&LoopData, TopologyError> {
        self.loops
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("loop".into()))
    }

    /// Returns a mutable reference to the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub(crate) fn loop_mut(&mut self, id: LoopId) -> Result<&mut LoopData, TopologyError> {
        self.loops
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("loop".into()))
    }

    /// Iterates over all loops in trace order.
    pub fn loops(&self) -> impl Iterator<Item = (LoopId, &LoopData)> {
        self.loops.iter()
    }

    /// Loops enclosing a face, in trace order.
    pub fn face_loops(&self) -> impl Iterator<Item = (LoopId, &LoopData)> {
        self.loops.iter().filter(|(_, l)| l.kind == LoopKind::Face)
    }

    /// Loops with no parent: the roots of the nesting forest.
    #[must_use]
    pub fn root_loops(&self) -> Vec<LoopId> {
        self.loops
            .iter()
            .filter(|(_, l)| l.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    // --- Diagnostics ---

    /// Source edges with a zero-length sub-edge that was dropped.
    #[must_use]
    pub fn degenerate_edges(&self) -> &[SourceEdgeId] {
        &self.degenerate_edges
    }

    pub(crate) fn push_degenerate_edge(&mut self, id: SourceEdgeId) {
        if !self.degenerate_edges.contains(&id) {
            self.degenerate_edges.push(id);
        }
    }

    /// Half-edges whose trace never closed; they belong to no loop.
    #[must_use]
    pub fn unclosed_half_edges(&self) -> &[HalfEdgeId] {
        &self.unclosed_half_edges
    }

    pub(crate) fn push_unclosed_half_edges(&mut self, ids: &[HalfEdgeId]) {
        self.unclosed_half_edges.extend_from_slice(ids);
    }

    // --- Edge sides ---

    /// Classifies the sub-edge of `id` by the loops on its two sides.
    ///
    /// A side that belongs to no loop counts as bounding.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge or its partner is not found.
    pub fn edge_side(&self, id: HalfEdgeId) -> Result<EdgeSide, TopologyError> {
        let he = self.half_edge(id)?;
        let partner = self.half_edge(he.partner)?;
        let is_face = |loop_id: Option<LoopId>| {
            loop_id
                .and_then(|l| self.loops.get(l))
                .is_some_and(|l| l.kind == LoopKind::Face)
        };
        Ok(match (is_face(he.loop_id), is_face(partner.loop_id)) {
            (true, true) => EdgeSide::Interior,
            (false, false) => EdgeSide::Isolated,
            _ => EdgeSide::Perimeter,
        })
    }

    fn sub_edges_with_side(&self, side: EdgeSide) -> Vec<HalfEdgeId> {
        self.half_edges
            .iter()
            .filter(|(_, he)| !he.reversed)
            .filter(|(id, _)| self.edge_side(*id).is_ok_and(|s| s == side))
            .map(|(id, _)| id)
            .collect()
    }

    /// Forward half-edges of sub-edges with faces on both sides.
    #[must_use]
    pub fn inner_edges(&self) -> Vec<HalfEdgeId> {
        self.sub_edges_with_side(EdgeSide::Interior)
    }

    /// Forward half-edges of sub-edges between a face and the outside.
    #[must_use]
    pub fn outer_edges(&self) -> Vec<HalfEdgeId> {
        self.sub_edges_with_side(EdgeSide::Perimeter)
    }

    /// Forward half-edges of sub-edges touching no face.
    #[must_use]
    pub fn isolate_edges(&self) -> Vec<HalfEdgeId> {
        self.sub_edges_with_side(EdgeSide::Isolated)
    }

    // --- Output ---

    /// One normalized region per valid face loop, with its bounding
    /// children as holes.
    #[must_use]
    pub fn regions(&self) -> Vec<Region> {
        self.face_loops()
            .filter(|(_, l)| l.valid && l.outline.len() >= 3)
            .map(|(_, face)| {
                let holes = face
                    .children
                    .iter()
                    .filter_map(|c| self.loops.get(*c))
                    .filter(|c| c.kind == LoopKind::Bounding)
                    .map(|c| c.outline.clone())
                    .collect();
                Region::new(face.outline.clone(), holes).normalized()
            })
            .collect()
    }

    /// Re-checks the structural invariants of the graph.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::BrokenPartner`] if a partner link is not
    /// symmetric or does not mirror its endpoints,
    /// [`TopologyError::LoopNotClosed`] if a loop's half-edges do not chain
    /// end to start, and [`TopologyError::EntityNotFound`] for dangling keys.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for (id, he) in &self.half_edges {
            let partner = self.half_edge(he.partner)?;
            if partner.partner != id {
                return Err(TopologyError::BrokenPartner(format!(
                    "{id:?} -> {:?} -> {:?}",
                    he.partner, partner.partner
                )));
            }
            if partner.from != he.to || partner.to != he.from {
                return Err(TopologyError::BrokenPartner(format!(
                    "{id:?} and {:?} do not share endpoints",
                    he.partner
                )));
            }
        }

        for (loop_id, data) in &self.loops {
            let n = data.half_edges.len();
            if n == 0 {
                return Err(TopologyError::LoopNotClosed(format!("{loop_id:?} is empty")));
            }
            for i in 0..n {
                let cur = self.half_edge(data.half_edges[i])?;
                let next_id = data.half_edges[(i + 1) % n];
                let next = self.half_edge(next_id)?;
                if cur.to != next.from || cur.next != Some(next_id) {
                    return Err(TopologyError::LoopNotClosed(format!(
                        "{loop_id:?} breaks after {:?}",
                        data.half_edges[i]
                    )));
                }
                if cur.loop_id != Some(loop_id) {
                    return Err(TopologyError::LoopNotClosed(format!(
                        "{:?} is not tagged with {loop_id:?}",
                        data.half_edges[i]
                    )));
                }
            }

            // Nesting forest: parents are faces and list this loop as a child.
            if let Some(parent_id) = data.parent {
                let parent = self.loop_data(parent_id)?;
                if parent.kind != LoopKind::Face || !parent.children.contains(&loop_id) {
                    return Err(TopologyError::LoopNotClosed(format!(
                        "{loop_id:?} has an inconsistent parent {parent_id:?}"
                    )));
                }
            }
        }

        Ok(())
    }
}
