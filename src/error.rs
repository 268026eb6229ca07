use thiserror::Error;

/// Top-level error type for the planform kernel.
#[derive(Debug, Error)]
pub enum PlanformError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Structural invariant violations inside an arrangement build.
///
/// These indicate a corrupted graph rather than messy user geometry and are
/// always propagated to the caller.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("broken partner link: {0}")]
    BrokenPartner(String),

    #[error("loop traversal exceeded {limit} steps (took {steps})")]
    TraversalRunaway { steps: usize, limit: usize },

    #[error("loop is not closed: {0}")]
    LoopNotClosed(String),
}

/// Errors related to region operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("coordinate {value} does not fit the integer grid at scale {scale}")]
    CoordinateOverflow { value: f64, scale: f64 },
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`PlanformError`].
pub type Result<T> = std::result::Result<T, PlanformError>;
