use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::TopologyError;
use crate::math::polygon_2d::{dedup_points, locate_point, polygon_self_intersects, PointLocation};
use crate::math::{Point2, TOLERANCE};
use crate::operations::arrangement::ArrangementParams;
use crate::topology::{HalfEdgeId, LoopGraph, LoopId, LoopKind};

/// Sorts loops into faces and bounding loops, builds the nesting forest
/// and prepares each loop's region outline.
///
/// # Errors
///
/// Returns a [`TopologyError`] if a loop references a missing half-edge.
pub fn classify_loops<P>(
    graph: &mut LoopGraph<P>,
    params: &ArrangementParams,
) -> Result<(), TopologyError> {
    let ids: Vec<LoopId> = graph.loops().map(|(id, _)| id).collect();

    // Orientation, outline and validity.
    for &id in &ids {
        let half_edges = graph.loop_data(id)?.half_edges.clone();
        let trimmed = remove_spikes(graph, &half_edges)?;
        let outline = outline_points(graph, &trimmed)?;

        let data = graph.loop_mut(id)?;
        data.kind = if data.area > params.area_epsilon {
            LoopKind::Face
        } else {
            LoopKind::Bounding
        };
        if data.kind == LoopKind::Face && polygon_self_intersects(&outline) {
            warn!(
                loop_id = ?id,
                area = data.area,
                "face loop crosses itself, excluded from regions"
            );
            data.valid = false;
        }
        data.outline = outline;
    }

    // Nesting: the parent is the smallest face that strictly contains the loop.
    let tol = params.tolerance;
    let mut parents: Vec<(LoopId, LoopId)> = Vec::new();
    for &child in &ids {
        let child_data = graph.loop_data(child)?;
        let partners: HashSet<HalfEdgeId> = child_data
            .half_edges
            .iter()
            .map(|h| graph.partner(*h))
            .collect::<Result<_, _>>()?;

        let mut best: Option<(LoopId, f64)> = None;
        for (candidate, face) in graph.face_loops() {
            if candidate == child || face.half_edges.iter().any(|h| partners.contains(h)) {
                continue;
            }
            if !is_nested_in(&child_data.points, &face.points, tol) {
                continue;
            }
            let size = face.area.abs();
            if best.is_none_or(|(_, b)| size < b) {
                best = Some((candidate, size));
            }
        }
        if let Some((parent, _)) = best {
            parents.push((child, parent));
        }
    }

    for (child, parent) in parents {
        graph.loop_mut(child)?.parent = Some(parent);
        graph.loop_mut(parent)?.children.push(child);
    }

    debug!(
        loops = ids.len(),
        faces = graph.face_loops().count(),
        roots = graph.root_loops().len(),
        "classified loops"
    );
    Ok(())
}

/// Every point inside or on `outer`, at least one strictly inside.
fn is_nested_in(points: &[Point2], outer: &[Point2], tol: f64) -> bool {
    let mut strictly_inside = false;
    for p in points {
        match locate_point(p, outer, tol) {
            PointLocation::Outside => return false,
            PointLocation::Inside => strictly_inside = true,
            PointLocation::OnBoundary => {}
        }
    }
    strictly_inside
}

/// Drops dead-end spikes: a half-edge immediately followed by its partner,
/// cyclically, until none remain.
fn remove_spikes<P>(
    graph: &LoopGraph<P>,
    half_edges: &[HalfEdgeId],
) -> Result<Vec<HalfEdgeId>, TopologyError> {
    let mut stack: Vec<HalfEdgeId> = Vec::with_capacity(half_edges.len());
    for &h in half_edges {
        match stack.last() {
            Some(&top) if graph.partner(top)? == h => {
                stack.pop();
            }
            _ => stack.push(h),
        }
    }

    // Close the cycle: the tail may cancel against the head.
    let mut head = 0;
    while stack.len() - head >= 2 {
        let (first, last) = (stack[head], stack[stack.len() - 1]);
        if graph.partner(last)? == first {
            stack.pop();
            head += 1;
        } else {
            break;
        }
    }
    Ok(stack.split_off(head))
}

fn outline_points<P>(
    graph: &LoopGraph<P>,
    half_edges: &[HalfEdgeId],
) -> Result<Vec<Point2>, TopologyError> {
    let mut points = Vec::new();
    for h in half_edges {
        let he = graph.half_edge(*h)?;
        let n = he.points.len();
        points.extend_from_slice(&he.points[..n.saturating_sub(1)]);
    }
    Ok(dedup_points(&points, TOLERANCE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use crate::geometry::{Arc2d, Region};
    use crate::math::polygon_2d::signed_area_2d;
    use crate::math::Point2;
    use crate::operations::arrangement::Arrangement;
    use crate::topology::{EdgeSide, LoopKind};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn rect(arr: &mut Arrangement, x0: f64, y0: f64, x1: f64, y1: f64) {
        arr.insert_path(&[p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)], true);
    }

    #[test]
    fn simple_room_region() {
        let mut arr = Arrangement::new();
        rect(&mut arr, 0.0, 0.0, 4.0, 3.0);
        let graph = arr.build().unwrap();

        assert_eq!(graph.face_loops().count(), 1);
        assert_eq!(graph.loops().filter(|(_, l)| l.is_cw()).count(), 1);

        let regions = graph.regions();
        assert_eq!(regions.len(), 1);
        assert!(regions[0].holes.is_empty());
        assert_eq!(
            regions[0].outer,
            vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0), p(0.0, 3.0)]
        );
    }

    #[test]
    fn room_with_column_has_hole() {
        let mut arr = Arrangement::new();
        rect(&mut arr, 0.0, 0.0, 4.0, 3.0);
        rect(&mut arr, 1.0, 1.0, 2.0, 2.0);
        let graph = arr.build().unwrap();
        graph.validate().unwrap();

        assert_eq!(graph.face_loops().count(), 2);
        let (room_id, room) = graph
            .face_loops()
            .max_by(|a, b| a.1.area.total_cmp(&b.1.area))
            .unwrap();
        let hole = room
            .children
            .iter()
            .map(|c| graph.loop_data(*c).unwrap())
            .find(|c| c.kind == LoopKind::Bounding)
            .unwrap();
        assert_eq!(hole.parent, Some(room_id));
        assert_eq!(hole.half_edges.len(), 4);

        let regions = graph.regions();
        assert_eq!(regions.len(), 2);
        let room_region = regions.iter().find(|r| r.area() > 5.0).unwrap();
        assert_eq!(room_region.holes.len(), 1);
        assert_eq!(
            room_region.holes[0],
            vec![p(1.0, 1.0), p(1.0, 2.0), p(2.0, 2.0), p(2.0, 1.0)]
        );
        assert_relative_eq!(room_region.area(), 11.0, epsilon = 1e-9);
    }

    #[test]
    fn t_junction_has_no_faces() {
        let mut arr = Arrangement::new();
        arr.insert_segment(p(0.0, 0.0), p(2.0, 0.0));
        arr.insert_segment(p(2.0, 0.0), p(4.0, 0.0));
        arr.insert_segment(p(2.0, 0.0), p(2.0, 3.0));
        let graph = arr.build().unwrap();

        assert_eq!(graph.face_loops().count(), 0);
        assert!(graph.loops().all(|(_, l)| l.is_bound_loop()));
        assert!(graph.regions().is_empty());
    }

    #[test]
    fn crossing_walls_make_four_rooms() {
        let mut arr = Arrangement::new();
        rect(&mut arr, 0.0, 0.0, 4.0, 4.0);
        arr.insert_segment(p(2.0, 0.0), p(2.0, 4.0));
        arr.insert_segment(p(0.0, 2.0), p(4.0, 2.0));
        let regions = arr.regions().unwrap();
        assert_eq!(regions.len(), 4);
        for r in &regions {
            assert_relative_eq!(r.area(), 4.0, epsilon = 1e-9);
            assert!(r.holes.is_empty());
        }
    }

    #[test]
    fn dangling_wall_inside_room_is_ignored() {
        let mut arr = Arrangement::new();
        rect(&mut arr, 0.0, 0.0, 4.0, 3.0);
        arr.insert_segment(p(4.0, 1.5), p(2.5, 1.5));
        arr.insert_segment(p(1.0, 1.0), p(1.5, 2.0));
        let regions = arr.regions().unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].outer.len(), 5, "outline keeps the T vertex on the wall");
        assert!(regions[0].holes.is_empty());
        assert_relative_eq!(regions[0].area(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn circular_column_is_a_hole() {
        let mut arr = Arrangement::new();
        rect(&mut arr, 0.0, 0.0, 10.0, 10.0);
        arr.insert_circle(p(5.0, 5.0), 1.0).unwrap();
        let graph = arr.build().unwrap();
        let regions = graph.regions();
        assert_eq!(regions.len(), 2);
        let room = regions.iter().find(|r| r.area() > 50.0).unwrap();
        assert_eq!(room.holes.len(), 1);
        assert!(signed_area_2d(&room.holes[0]) < 0.0);
        assert!((room.area() - (100.0 - std::f64::consts::PI)).abs() < 0.05);
    }

    #[test]
    fn arc_bounded_room_area() {
        // 4x2 room whose top wall is a semicircular bay of radius 2.
        let mut arr = Arrangement::new();
        arr.insert_segment(p(0.0, 0.0), p(4.0, 0.0));
        arr.insert_segment(p(4.0, 0.0), p(4.0, 2.0));
        arr.insert_segment(p(0.0, 2.0), p(0.0, 0.0));
        let bay = Arc2d::from_bulge(&p(4.0, 2.0), &p(0.0, 2.0), 1.0).unwrap();
        arr.insert_arc(bay);
        let regions = arr.regions().unwrap();
        assert_eq!(regions.len(), 1);
        let expected = 8.0 + 2.0 * std::f64::consts::PI;
        assert!((regions[0].area() - expected).abs() < 0.1, "area={}", regions[0].area());
    }

    #[test]
    fn adjacent_rooms_edge_sides() {
        let mut arr = Arrangement::new();
        rect(&mut arr, 0.0, 0.0, 4.0, 3.0);
        arr.insert_segment(p(2.0, 0.0), p(2.0, 3.0));
        arr.insert_segment(p(4.0, 1.0), p(6.0, 1.0));
        let graph = arr.build().unwrap();

        assert_eq!(graph.inner_edges().len(), 1);
        assert_eq!(graph.outer_edges().len(), 7);
        assert_eq!(graph.isolate_edges().len(), 1);

        let shared = graph.inner_edges()[0];
        assert_eq!(graph.edge_side(shared).unwrap(), EdgeSide::Interior);
        let he = graph.half_edge(shared).unwrap();
        assert!((graph.vertex(he.from).unwrap().point.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn nesting_forest_is_consistent() {
        let mut arr = Arrangement::new();
        rect(&mut arr, 0.0, 0.0, 20.0, 20.0);
        rect(&mut arr, 2.0, 2.0, 10.0, 10.0);
        rect(&mut arr, 4.0, 4.0, 6.0, 6.0);
        let graph = arr.build().unwrap();
        graph.validate().unwrap();

        // Outermost bounding loop is the only root.
        let roots = graph.root_loops();
        assert_eq!(roots.len(), 2, "outer room face and its bounding loop");
        for (id, l) in graph.loops() {
            if let Some(parent) = l.parent {
                let pl = graph.loop_data(parent).unwrap();
                assert!(pl.is_ccw());
                assert!(pl.children.contains(&id));
                assert!(pl.area.abs() > l.area.abs());
            }
        }

        let regions = graph.regions();
        assert_eq!(regions.len(), 3);
        let mut areas: Vec<f64> = regions.iter().map(Region::area).collect();
        areas.sort_by(f64::total_cmp);
        assert_relative_eq!(areas[0], 4.0, epsilon = 1e-9);
        assert_relative_eq!(areas[1], 60.0, epsilon = 1e-9);
        assert_relative_eq!(areas[2], 336.0, epsilon = 1e-9);
    }
}
