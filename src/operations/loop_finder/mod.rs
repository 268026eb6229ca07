//! Half-edge assembly, angular loop tracing and loop classification.

mod assemble;
mod classify;
mod trace;

pub use assemble::assemble_half_edges;
pub use classify::classify_loops;
pub use trace::trace_loops;
