use thiserror::Error;

use crate::pool::ResourceKind;
use crate::topology::VertexId;

/// Top-level error type for the icosa engine.
#[derive(Debug, Error)]
pub enum IcosaError {
    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised by misuse of the resource pool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("a pool for {0:?} already exists")]
    DuplicateKind(ResourceKind),

    #[error("no pool has been created for {0:?}")]
    UnknownKind(ResourceKind),

    #[error("handle is not currently issued by the {0:?} pool")]
    NotIssued(ResourceKind),

    #[error("handle does not belong to this pool")]
    UnknownHandle,
}

/// Errors related to geometric computations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("at least 2 vertices are required, found {count}")]
    InsufficientVertices { count: usize },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the vertex/edge topology.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),
}

/// Errors related to engine commands.
#[derive(Debug, Error, PartialEq)]
pub enum OperationError {
    #[error("maximum subdivision stage {max} reached")]
    MaxStageReached { max: u32 },

    #[error("command `{0}` is currently disabled")]
    CommandDisabled(&'static str),

    #[error("shape has not been built yet")]
    NotBuilt,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`IcosaError`].
pub type Result<T> = std::result::Result<T, IcosaError>;
