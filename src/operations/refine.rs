use tracing::debug;

use crate::error::{PoolError, Result};
use crate::math::midpoint;
use crate::pool::{ResourceKind, ResourcePool};
use crate::topology::{Edge, EdgeList, VertexStore};

/// Splits every edge at its midpoint.
///
/// For each edge `(a, b)` a new vertex `m` is appended and the edge is
/// replaced by `(a, m)` and `(m, b)`. The new edge list is derived from the
/// old one only; distances are not rescanned.
#[derive(Debug)]
pub struct Refine<'a> {
    edges: &'a EdgeList,
}

impl<'a> Refine<'a> {
    /// Creates a new `Refine` operation over the given edges.
    #[must_use]
    pub fn new(edges: &'a EdgeList) -> Self {
        Self { edges }
    }

    /// Executes the refinement, appending one vertex per edge to `store`.
    ///
    /// All midpoints are computed before the store is touched, so a failing
    /// lookup leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge references a missing vertex, or if the
    /// pool has no [`ResourceKind::VertexVisual`] pool.
    pub fn execute(&self, store: &mut VertexStore, pool: &mut ResourcePool) -> Result<EdgeList> {
        if !pool.has_pool(ResourceKind::VertexVisual) {
            return Err(PoolError::UnknownKind(ResourceKind::VertexVisual).into());
        }

        let mut splits = Vec::with_capacity(self.edges.len());
        for edge in self.edges.iter() {
            let p = store.position(edge.a())?;
            let q = store.position(edge.b())?;
            splits.push((*edge, midpoint(&p, &q)));
        }

        let mut refined = EdgeList::with_capacity(splits.len() * 2);
        for (edge, mid) in splits {
            let m = store.add(pool, mid)?;
            refined.insert(Edge::new(edge.a(), m));
            refined.insert(Edge::new(m, edge.b()));
        }
        debug!(
            vertices = store.len(),
            edges = refined.len(),
            "refined edges"
        );
        Ok(refined)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{IcosaError, TopologyError};
    use crate::geometry::{icosahedron_seed, GOLDEN_RATIO};
    use crate::math::Point3;
    use crate::operations::{BuildEdges, ShortSide};
    use crate::topology::VertexId;
    use approx::assert_relative_eq;

    fn icosahedron(pool: &mut ResourcePool) -> (VertexStore, EdgeList) {
        let mut store = VertexStore::new();
        for p in icosahedron_seed(GOLDEN_RATIO) {
            store.add(pool, p).unwrap();
        }
        let short = ShortSide::new().execute(&store).unwrap();
        let edges = BuildEdges::new(short).execute(&store).unwrap();
        (store, edges)
    }

    fn vertex_pool() -> ResourcePool {
        let mut pool = ResourcePool::new();
        pool.create_pool(ResourceKind::VertexVisual, 64).unwrap();
        pool
    }

    #[test]
    fn adds_one_vertex_and_two_edges_per_edge() {
        let mut pool = vertex_pool();
        let (mut store, edges) = icosahedron(&mut pool);
        let (v, e) = (store.len(), edges.len());

        let refined = Refine::new(&edges).execute(&mut store, &mut pool).unwrap();
        assert_eq!(store.len(), v + e);
        assert_eq!(refined.len(), 2 * e);

        let again = Refine::new(&refined).execute(&mut store, &mut pool).unwrap();
        assert_eq!(store.len(), v + e + 2 * e);
        assert_eq!(again.len(), 4 * e);
    }

    #[test]
    fn midpoint_placed_between_endpoints() {
        let mut pool = vertex_pool();
        let mut store = VertexStore::new();
        store.add(&mut pool, Point3::new(0.0, 0.0, 0.0)).unwrap();
        store.add(&mut pool, Point3::new(2.0, 4.0, 0.0)).unwrap();
        let edges: EdgeList = std::iter::once(Edge::new(VertexId(0), VertexId(1))).collect();

        let refined = Refine::new(&edges).execute(&mut store, &mut pool).unwrap();
        assert_relative_eq!(store.position(VertexId(2)).unwrap(), Point3::new(1.0, 2.0, 0.0));
        assert!(refined.contains(&Edge::new(VertexId(0), VertexId(2))));
        assert!(refined.contains(&Edge::new(VertexId(2), VertexId(1))));
        assert!(!refined.contains(&Edge::new(VertexId(0), VertexId(1))));
    }

    #[test]
    fn dangling_edge_leaves_store_untouched() {
        let mut pool = vertex_pool();
        let mut store = VertexStore::new();
        store.add(&mut pool, Point3::origin()).unwrap();
        store.add(&mut pool, Point3::new(1.0, 0.0, 0.0)).unwrap();
        let edges: EdgeList = [
            Edge::new(VertexId(0), VertexId(1)),
            Edge::new(VertexId(1), VertexId(9)),
        ]
        .into_iter()
        .collect();

        let err = Refine::new(&edges).execute(&mut store, &mut pool).unwrap_err();
        assert!(matches!(
            err,
            IcosaError::Topology(TopologyError::VertexNotFound(VertexId(9)))
        ));
        assert_eq!(store.len(), 2);
    }
}
