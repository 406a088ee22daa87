pub mod edge;
pub mod vertex;

pub use edge::{Edge, EdgeList};
pub use vertex::{Vertex, VertexId};

use crate::error::{PoolError, TopologyError};
use crate::math::Point3;
use crate::pool::{ResourceKind, ResourcePool};

/// Ordered collection of vertices, each backed by a pooled visual.
///
/// Vertices are never removed one at a time, so a vertex id is always
/// equal to its index and lookups are direct.
#[derive(Debug, Default)]
pub struct VertexStore {
    vertices: Vec<Vertex>,
}

impl VertexStore {
    /// Creates a new, empty vertex store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex at `position` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool has no [`ResourceKind::VertexVisual`] pool.
    pub fn add(&mut self, pool: &mut ResourcePool, position: Point3) -> Result<VertexId, PoolError> {
        let handle = pool.acquire(ResourceKind::VertexVisual)?;
        pool.apply_template_scale(ResourceKind::VertexVisual, handle)?;
        pool.handle_mut(handle)?.transform.position = position;

        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            position,
            handle,
        });
        Ok(id)
    }

    /// Returns the vertex with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexNotFound`] if no such vertex exists.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex, TopologyError> {
        self.vertices
            .get(id.index())
            .ok_or(TopologyError::VertexNotFound(id))
    }

    /// Returns the position of the vertex with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexNotFound`] if no such vertex exists.
    pub fn position(&self, id: VertexId) -> Result<Point3, TopologyError> {
        self.vertex(id).map(|v| v.position)
    }

    /// Moves a vertex and its visual.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex or its handle does not exist.
    pub fn set_position(
        &mut self,
        pool: &mut ResourcePool,
        id: VertexId,
        position: Point3,
    ) -> crate::Result<()> {
        let vertex = self
            .vertices
            .get_mut(id.index())
            .ok_or(TopologyError::VertexNotFound(id))?;
        pool.handle_mut(vertex.handle)?.transform.position = position;
        vertex.position = position;
        Ok(())
    }

    /// Releases every vertex visual back to the pool and empties the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a handle could not be released. The store is
    /// empty afterwards regardless.
    pub fn clear(&mut self, pool: &mut ResourcePool) -> Result<(), PoolError> {
        let mut result = Ok(());
        for vertex in self.vertices.drain(..) {
            if let Err(err) = pool.release(ResourceKind::VertexVisual, vertex.handle) {
                result = result.and(Err(err));
            }
        }
        result
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Snapshot of all positions, indexed by vertex id.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3> {
        self.vertices.iter().map(|v| v.position).collect()
    }
}
