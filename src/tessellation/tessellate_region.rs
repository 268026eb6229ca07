use std::collections::{HashMap, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::{trace, warn};

use crate::error::{Result, TessellationError};
use crate::geometry::Region;
use crate::math::Point2;

use super::{triangle_area, TriangleMesh2d};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a region with a constrained Delaunay triangulation.
///
/// Boundary rings become constraint edges; triangles are kept when an odd
/// number of constraints separates them from the unbounded face.
pub struct TessellateRegion<'a> {
    region: &'a Region,
}

impl<'a> TessellateRegion<'a> {
    /// Creates a new `TessellateRegion` operation.
    #[must_use]
    pub fn new(region: &'a Region) -> Self {
        Self { region }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] if the outer ring has
    /// fewer than three points, and [`TessellationError::Failed`] if a point
    /// cannot be inserted (non-finite coordinates).
    pub fn execute(&self) -> Result<TriangleMesh2d> {
        if self.region.outer.len() < 3 {
            return Err(TessellationError::InvalidParameters(format!(
                "outer ring has {} points",
                self.region.outer.len()
            ))
            .into());
        }

        let mut cdt = Cdt::new();
        insert_constraint_loop(&mut cdt, &self.region.outer)?;
        for hole in self.region.holes.iter().filter(|h| h.len() >= 3) {
            insert_constraint_loop(&mut cdt, hole)?;
        }

        let depths = face_depths(&cdt);
        let mut mesh = TriangleMesh2d::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face in cdt.inner_faces() {
            if depths.get(&face.fix().index()).is_none_or(|d| d % 2 == 0) {
                continue;
            }
            let mut tri = [0_u32; 3];
            for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
                *slot = *vertex_map.entry(vh.fix().index()).or_insert_with(|| {
                    let pos = vh.position();
                    mesh.vertices.push(Point2::new(pos.x, pos.y));
                    (mesh.vertices.len() - 1) as u32
                });
            }
            mesh.indices.push(tri);
        }

        trace!(triangles = mesh.indices.len(), "tessellated region");
        Ok(mesh)
    }

    /// A point strictly inside the region: the centroid of its largest
    /// triangle.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::Failed`] if the region has no interior.
    pub fn interior_point(&self) -> Result<Point2> {
        let mesh = self.execute()?;
        mesh.triangles()
            .max_by(|a, b| triangle_area(a).total_cmp(&triangle_area(b)))
            .map(|t| Point2::from((t[0].coords + t[1].coords + t[2].coords) / 3.0))
            .ok_or_else(|| TessellationError::Failed("region has no interior".into()).into())
    }
}

/// Inserts a closed ring as constraint edges.
///
/// Edges that would cross an existing constraint are skipped.
fn insert_constraint_loop(cdt: &mut Cdt, ring: &[Point2]) -> Result<()> {
    let mut handles = Vec::with_capacity(ring.len());
    for p in ring {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        } else {
            warn!(index = i, "skipping constraint edge that crosses another");
        }
    }
    Ok(())
}

type FaceQueue = VecDeque<(FixedFaceHandle<InnerTag>, u32)>;

/// Minimum number of constraint edges crossed to reach each inner face
/// from the unbounded face.
///
/// 0-1 breadth-first search: crossing a constraint costs one, any other
/// edge is free.
fn face_depths(cdt: &Cdt) -> HashMap<usize, u32> {
    let mut depth: HashMap<usize, u32> = HashMap::new();
    let mut queue = FaceQueue::new();
    let outer = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let cost = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            relax(&mut depth, &mut queue, inner.fix(), 0, cost);
        }
    }

    while let Some((face_fix, d)) = queue.pop_front() {
        if depth.get(&face_fix.index()).is_some_and(|best| *best < d) {
            continue;
        }
        for edge in cdt.face(face_fix).adjacent_edges() {
            if let Some(neighbor) = edge.rev().face().as_inner() {
                let cost = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                relax(&mut depth, &mut queue, neighbor.fix(), d, cost);
            }
        }
    }

    depth
}

fn relax(
    depth: &mut HashMap<usize, u32>,
    queue: &mut FaceQueue,
    face: FixedFaceHandle<InnerTag>,
    d: u32,
    cost: u32,
) {
    let nd = d + cost;
    if depth.get(&face.index()).is_some_and(|old| *old <= nd) {
        return;
    }
    depth.insert(face.index(), nd);
    if cost == 0 {
        queue.push_front((face, nd));
    } else {
        queue.push_back((face, nd));
    }
}
