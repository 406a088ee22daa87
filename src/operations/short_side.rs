use nalgebra::distance;

use crate::error::GeometryError;
use crate::topology::VertexStore;

/// Computes the minimum pairwise distance over all vertices of a store.
///
/// This is the adjacency threshold used by [`BuildEdges`](super::BuildEdges).
#[derive(Debug, Default)]
pub struct ShortSide;

impl ShortSide {
    /// Creates a new `ShortSide` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InsufficientVertices`] if the store holds
    /// fewer than 2 vertices.
    pub fn execute(&self, store: &VertexStore) -> Result<f64, GeometryError> {
        let positions = store.positions();
        if positions.len() < 2 {
            return Err(GeometryError::InsufficientVertices {
                count: positions.len(),
            });
        }

        let mut short = f64::INFINITY;
        for (i, p) in positions.iter().enumerate() {
            for q in &positions[i + 1..] {
                short = short.min(distance(p, q));
            }
        }
        Ok(short)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{icosahedron_seed, GOLDEN_RATIO};
    use crate::math::Point3;
    use crate::pool::{ResourceKind, ResourcePool};
    use approx::assert_relative_eq;

    fn store_of(points: &[Point3]) -> VertexStore {
        let mut pool = ResourcePool::new();
        pool.create_pool(ResourceKind::VertexVisual, 0).unwrap();
        let mut store = VertexStore::new();
        for p in points {
            store.add(&mut pool, *p).unwrap();
        }
        store
    }

    #[test]
    fn icosahedron_short_side_is_two() {
        let store = store_of(&icosahedron_seed(GOLDEN_RATIO));
        assert_relative_eq!(ShortSide::new().execute(&store).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn picks_closest_pair() {
        let store = store_of(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(5.0, 0.5, 0.0),
        ]);
        assert_relative_eq!(ShortSide::new().execute(&store).unwrap(), 0.5);
    }

    #[test]
    fn degenerate_store_rejected() {
        let store = store_of(&[Point3::origin()]);
        assert_eq!(
            ShortSide::new().execute(&store),
            Err(GeometryError::InsufficientVertices { count: 1 })
        );
    }
}
