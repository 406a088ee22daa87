use std::fmt;

use crate::math::Point3;
use crate::pool::HandleId;

/// Dense identifier of a vertex: always equal to its slot in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Returns the storage slot of this vertex.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vertex of the shape.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Identity assigned at insertion.
    pub id: VertexId,
    /// The 3D position of the vertex.
    pub position: Point3,
    /// The pooled visual marking this vertex.
    pub handle: HandleId,
}
