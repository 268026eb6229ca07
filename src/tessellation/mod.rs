//! Triangulation of regions.

mod tessellate_region;

pub use tessellate_region::TessellateRegion;

use crate::math::Point2;

/// A planar triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh2d {
    /// Vertex positions.
    pub vertices: Vec<Point2>,
    /// Triangle indices, counter-clockwise.
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh2d {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Corner positions of each triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Point2; 3]> + '_ {
        self.indices.iter().map(|tri| tri.map(|i| self.vertices[i as usize]))
    }

    /// Sum of the triangle areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles().map(|t| triangle_area(&t)).sum()
    }
}

pub(crate) fn triangle_area(t: &[Point2; 3]) -> f64 {
    0.5 * crate::math::cross_2d(&(t[1] - t[0]), &(t[2] - t[0]))
}
