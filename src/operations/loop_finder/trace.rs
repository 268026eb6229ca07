use std::collections::{HashMap, HashSet};
use std::f64::consts::{PI, TAU};

use tracing::{trace, warn};

use crate::error::TopologyError;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{normalize_angle, Point2, Vector2};
use crate::topology::{HalfEdgeData, HalfEdgeId, LoopData, LoopGraph, VertexId};

const ANGLE_EPS: f64 = 1e-9;

/// Walks the half-edge graph and records every closed loop.
///
/// At each vertex the walk takes the smallest clockwise turn measured from
/// the reversed arrival direction, which keeps faces on the left: enclosed
/// faces come out counter-clockwise, component outlines clockwise.
///
/// # Errors
///
/// Returns [`TopologyError::TraversalRunaway`] if a single trace exceeds
/// `half_edge_count + 1` steps.
pub fn trace_loops<P>(graph: &mut LoopGraph<P>) -> Result<(), TopologyError> {
    let limit = graph.half_edge_count() + 1;
    trace_loops_capped(graph, limit)
}

/// [`trace_loops`] with an explicit per-trace step cap.
pub(crate) fn trace_loops_capped<P>(
    graph: &mut LoopGraph<P>,
    limit: usize,
) -> Result<(), TopologyError> {
    let mut outgoing: HashMap<VertexId, Vec<HalfEdgeId>> = HashMap::new();
    for (id, he) in graph.half_edges() {
        if !he.is_self_loop() {
            outgoing.entry(he.from).or_default().push(id);
        }
    }

    let order: Vec<HalfEdgeId> = graph.half_edges().map(|(id, _)| id).collect();
    let mut visited: HashSet<HalfEdgeId> = HashSet::new();

    for start in order {
        if visited.contains(&start) {
            continue;
        }
        visited.insert(start);

        if graph.half_edge(start)?.is_self_loop() {
            close_loop(graph, vec![start])?;
            continue;
        }

        let mut cycle = vec![start];
        let mut current = start;
        let mut steps = 0_usize;
        let closed = loop {
            steps += 1;
            if steps > limit {
                return Err(TopologyError::TraversalRunaway { steps, limit });
            }
            let next = pick_next(graph, &outgoing, current)?;
            if next == start {
                break true;
            }
            if !visited.insert(next) {
                break false;
            }
            cycle.push(next);
            current = next;
        };

        if closed {
            close_loop(graph, cycle)?;
        } else {
            warn!(?start, half_edges = cycle.len(), "trace did not close");
            graph.push_unclosed_half_edges(&cycle);
        }
    }

    Ok(())
}

/// Chooses the continuation of `current` at its end vertex.
fn pick_next<P>(
    graph: &LoopGraph<P>,
    outgoing: &HashMap<VertexId, Vec<HalfEdgeId>>,
    current: HalfEdgeId,
) -> Result<HalfEdgeId, TopologyError> {
    let cur = graph.half_edge(current)?;
    let candidates: Vec<HalfEdgeId> = outgoing
        .get(&cur.to)
        .map(|list| list.iter().copied().filter(|h| *h != cur.partner).collect())
        .unwrap_or_default();

    // Dead end: turn back along the same sub-edge.
    if candidates.is_empty() {
        trace!(?current, "dead end");
        return Ok(cur.partner);
    }

    let back = angle_of(&-cur.direction_to);
    let mut best: Option<(HalfEdgeId, f64, f64)> = None;
    for id in candidates {
        let he = graph.half_edge(id)?;
        let (turn, chord_turn) = turn_keys(back, he);
        let Some((_, best_turn, best_chord)) = best else {
            best = Some((id, turn, chord_turn));
            continue;
        };
        if turn < best_turn - ANGLE_EPS {
            best = Some((id, turn, chord_turn));
        } else if (turn - best_turn).abs() <= ANGLE_EPS {
            if chord_turn < best_chord - ANGLE_EPS {
                best = Some((id, turn, chord_turn));
            } else if (chord_turn - best_chord).abs() <= ANGLE_EPS {
                warn!(vertex = ?cur.to, ?current, "ambiguous junction, keeping arena order");
            }
        }
    }

    Ok(best.map_or(cur.partner, |(id, _, _)| id))
}

/// Clockwise turn from the reversed arrival direction to the candidate's
/// tangent, and to its chord towards the first sample.
///
/// A tangent leaving straight back along the arrival is placed just before
/// or just after the partner depending on which way its chord bends.
fn turn_keys(back: f64, he: &HalfEdgeData) -> (f64, f64) {
    let chord_turn = normalize_angle(back - angle_of(&he.chord_direction()));
    let mut turn = normalize_angle(back - angle_of(&he.direction_from));
    if turn < ANGLE_EPS || turn > TAU - ANGLE_EPS {
        turn = if chord_turn < PI { 0.0 } else { TAU };
    }
    (turn, chord_turn)
}

fn angle_of(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

/// Links `cycle` into a loop and stores it.
fn close_loop<P>(graph: &mut LoopGraph<P>, cycle: Vec<HalfEdgeId>) -> Result<(), TopologyError> {
    let mut points: Vec<Point2> = Vec::new();
    for id in &cycle {
        let he = graph.half_edge(*id)?;
        let n = he.points.len();
        points.extend_from_slice(&he.points[..n.saturating_sub(1)]);
    }
    let area = signed_area_2d(&points);

    let n = cycle.len();
    let loop_id = graph.add_loop(LoopData::new(cycle.clone(), points, area));
    for i in 0..n {
        let he = graph.half_edge_mut(cycle[i])?;
        he.next = Some(cycle[(i + 1) % n]);
        he.prev = Some(cycle[(i + n - 1) % n]);
        he.loop_id = Some(loop_id);
    }
    trace!(?loop_id, half_edges = n, area, "closed loop");
    Ok(())
}
