use crate::math::Point3;
use crate::topology::{Edge, VertexId};

/// Change notifications for the layer that draws the shape.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Every vertex was removed.
    VerticesCleared,
    /// A vertex was appended.
    VertexAdded { id: VertexId, position: Point3 },
    /// Edge visuals should be taken down.
    EdgesCleared,
    /// The edges to draw, replacing any drawn before.
    EdgesReplaced(Vec<Edge>),
    /// Vertex positions changed in place.
    VerticesMoved,
}

/// Which commands are currently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandSet {
    pub reset: bool,
    pub subdivide: bool,
    pub to_sphere: bool,
}

impl CommandSet {
    #[must_use]
    pub const fn new(reset: bool, subdivide: bool, to_sphere: bool) -> Self {
        Self {
            reset,
            subdivide,
            to_sphere,
        }
    }

    /// Nothing is accepted.
    pub const NONE: Self = Self::new(false, false, false);
}
