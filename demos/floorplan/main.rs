//! Builds a small floor plan and prints the rooms it finds.
//!
//! ```text
//! cargo run --example floorplan
//! RUST_LOG=planform=debug cargo run --example floorplan
//! ```

use planform::geometry::Arc2d;
use planform::math::Point2;
use planform::operations::query::overlap_area;
use planform::{Arrangement, BooleanOp, BooleanParams, PlanformError};

fn main() -> Result<(), PlanformError> {
    // Default: WARN for everything, INFO for planform.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("planform=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let p = Point2::new;
    let mut plan = Arrangement::new();

    // Outer walls, one partition, and a bay window on the east side.
    plan.insert_path(&[p(0.0, 0.0), p(8.0, 0.0), p(8.0, 5.0), p(0.0, 5.0)], true);
    plan.insert_segment(p(4.0, 0.0), p(4.0, 5.0));
    plan.insert_arc(Arc2d::through(&p(8.0, 1.5), &p(9.0, 2.5), &p(8.0, 3.5))?);
    // A column in the west room and a stub wall that encloses nothing.
    plan.insert_circle(p(2.0, 2.5), 0.3)?;
    plan.insert_segment(p(4.0, 2.5), p(5.5, 2.5));

    let graph = plan.build()?;
    graph.validate()?;
    let rooms = graph.regions();

    for (i, room) in rooms.iter().enumerate() {
        println!(
            "room {i}: {} outline points, {} holes, area {:.3}",
            room.outer.len(),
            room.holes.len(),
            room.area()
        );
    }
    println!(
        "edges: {} inner, {} outer, {} isolated",
        graph.inner_edges().len(),
        graph.outer_edges().len(),
        graph.isolate_edges().len()
    );

    if let [west, east, ..] = rooms.as_slice() {
        let merged = planform::boolean_execute(
            std::slice::from_ref(west),
            std::slice::from_ref(east),
            BooleanOp::Union,
            &BooleanParams::default(),
        )?;
        println!("west + east: {} region(s)", merged.len());
        println!("overlap: {:.3}", overlap_area(west, east)?);
    }

    Ok(())
}
