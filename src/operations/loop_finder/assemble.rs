use tracing::{debug, warn};

use crate::error::TopologyError;
use crate::geometry::curve::Curve;
use crate::math::Point2;
use crate::operations::arrangement::ArrangementParams;
use crate::topology::{
    ArcInfo, HalfEdgeData, HalfEdgeId, LoopGraph, SourceEdgeData, SourceEdgeId, VertexId,
};

/// Cuts every source edge at its splits and emits one partnered pair of
/// half-edges per surviving sub-edge.
///
/// Zero-length sub-edges are dropped and reported; overlapping duplicates
/// (same end vertices, same midpoint) keep only the first occurrence.
pub fn assemble_half_edges<P>(
    graph: &mut LoopGraph<P>,
    params: &ArrangementParams,
) -> Result<(), TopologyError> {
    let tol = params.tolerance;
    let edges: Vec<(SourceEdgeId, SourceEdgeData)> = graph
        .source_edges()
        .map(|(id, e)| (id, e.clone()))
        .collect();

    let mut kept: Vec<(VertexId, VertexId, Point2)> = Vec::new();
    let mut merged = 0_usize;

    for (edge_id, edge) in &edges {
        let curve = &edge.curve;
        for (s0, s1) in edge.sub_edges() {
            let mut points = curve.sample(
                s0.t,
                s1.t,
                params.chord_tolerance,
                params.min_arc_segments,
                params.max_arc_segments,
            );
            let length: f64 = points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
            let straight = curve.arc_params().is_none();
            if length <= tol || (straight && s0.vertex == s1.vertex) {
                warn!(
                    ?edge_id,
                    t_from = s0.t,
                    t_to = s1.t,
                    length,
                    "dropping degenerate sub-edge"
                );
                graph.push_degenerate_edge(*edge_id);
                continue;
            }

            let mid = curve.evaluate(0.5 * (s0.t + s1.t));
            let duplicate = kept.iter().any(|(a, b, m)| {
                ((*a == s0.vertex && *b == s1.vertex) || (*a == s1.vertex && *b == s0.vertex))
                    && (m - mid).norm() <= tol
            });
            if duplicate {
                merged += 1;
                continue;
            }
            kept.push((s0.vertex, s1.vertex, mid));

            // Pin the polyline ends to the snapped vertex positions.
            let from_point = graph.vertex(s0.vertex)?.point;
            let to_point = graph.vertex(s1.vertex)?.point;
            if let Some(first) = points.first_mut() {
                *first = from_point;
            }
            if let Some(last) = points.last_mut() {
                *last = to_point;
            }

            let tangent_from = curve.tangent(s0.t);
            let tangent_to = curve.tangent(s1.t);
            let arc = curve.arc_params().map(|a| ArcInfo {
                center: a.center,
                radius: a.radius,
                ccw: a.sweep > 0.0,
            });

            let forward = HalfEdgeData {
                from: s0.vertex,
                to: s1.vertex,
                edge: *edge_id,
                t_from: s0.t,
                t_to: s1.t,
                direction_from: tangent_from,
                direction_to: tangent_to,
                arc,
                points: points.clone(),
                partner: HalfEdgeId::default(),
                next: None,
                prev: None,
                loop_id: None,
                reversed: false,
            };
            points.reverse();
            let reverse = HalfEdgeData {
                from: s1.vertex,
                to: s0.vertex,
                edge: *edge_id,
                t_from: s1.t,
                t_to: s0.t,
                direction_from: -tangent_to,
                direction_to: -tangent_from,
                arc: arc.map(|a| ArcInfo { ccw: !a.ccw, ..a }),
                points,
                partner: HalfEdgeId::default(),
                next: None,
                prev: None,
                loop_id: None,
                reversed: true,
            };
            graph.add_half_edge_pair(forward, reverse);
        }
    }

    debug!(
        half_edges = graph.half_edge_count(),
        degenerate = graph.degenerate_edges().len(),
        merged,
        "assembled half-edges"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Arc2d;
    use crate::operations::arrangement::Arrangement;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn partners_are_symmetric() {
        let mut arr = Arrangement::new();
        arr.insert_path(&[p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0), p(0.0, 3.0)], true);
        arr.insert_segment(p(2.0, 0.0), p(2.0, 3.0));
        let graph = arr.build().unwrap();

        assert_eq!(graph.half_edge_count() % 2, 0);
        assert_eq!(graph.half_edge_count(), 14);
        for (id, he) in graph.half_edges() {
            let partner = graph.half_edge(he.partner).unwrap();
            assert_eq!(partner.partner, id);
            assert_eq!(partner.from, he.to);
            assert_eq!(partner.to, he.from);
            assert_ne!(partner.reversed, he.reversed);
        }
    }

    #[test]
    fn zero_length_edge_is_dropped() {
        let mut arr = Arrangement::new();
        let e = arr.insert_segment(p(1.0, 1.0), p(1.0, 1.0 + 1e-8));
        let graph = arr.build().unwrap();
        assert_eq!(graph.half_edge_count(), 0);
        assert_eq!(graph.degenerate_edges(), &[e]);
    }

    #[test]
    fn overlapping_walls_are_merged() {
        let mut arr = Arrangement::new();
        arr.insert_segment(p(0.0, 0.0), p(4.0, 0.0));
        arr.insert_segment(p(4.0, 0.0), p(0.0, 0.0));
        let graph = arr.build().unwrap();
        assert_eq!(graph.half_edge_count(), 2);
    }

    #[test]
    fn arc_partners_flip_direction() {
        let mut arr = Arrangement::new();
        let arc = Arc2d::new(p(0.0, 0.0), 1.0, 0.0, std::f64::consts::PI).unwrap();
        arr.insert_arc(arc);
        let graph = arr.build().unwrap();
        let (_, fwd) = graph.half_edges().find(|(_, h)| !h.reversed).unwrap();
        let rev = graph.half_edge(fwd.partner).unwrap();
        let (fa, ra) = (fwd.arc.unwrap(), rev.arc.unwrap());
        assert!(fa.ccw);
        assert!(!ra.ccw);
        assert!((fa.radius - ra.radius).abs() < 1e-12);
        assert!((fwd.direction_from + rev.direction_to).norm() < 1e-12);
        assert_eq!(fwd.points.first(), rev.points.last());
    }

    #[test]
    fn lone_circle_is_a_self_loop_pair() {
        let mut arr = Arrangement::new();
        arr.insert_circle(p(0.0, 0.0), 1.0).unwrap();
        let graph = arr.build().unwrap();
        assert_eq!(graph.half_edge_count(), 2);
        assert!(graph.half_edges().all(|(_, h)| h.is_self_loop()));
    }
}
