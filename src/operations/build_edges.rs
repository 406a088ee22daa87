use nalgebra::distance;
use tracing::debug;

use crate::error::GeometryError;
use crate::topology::{Edge, EdgeList, VertexId, VertexStore};

/// Relative band around the short side within which a pair counts as an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceBand {
    /// Lower bound as a multiple of the short side.
    pub lower: f64,
    /// Upper bound as a multiple of the short side.
    pub upper: f64,
    /// Whether distances exactly on a bound are accepted.
    pub inclusive: bool,
}

impl ToleranceBand {
    /// A symmetric, exclusive band of `±fraction` around the short side.
    #[must_use]
    pub fn symmetric(fraction: f64) -> Self {
        Self {
            lower: 1.0 - fraction,
            upper: 1.0 + fraction,
            inclusive: false,
        }
    }

    /// Returns `true` if `dist` is within the band around `short_side`.
    #[must_use]
    pub fn contains(&self, dist: f64, short_side: f64) -> bool {
        let lo = short_side * self.lower;
        let hi = short_side * self.upper;
        if self.inclusive {
            dist >= lo && dist <= hi
        } else {
            dist > lo && dist < hi
        }
    }
}

impl Default for ToleranceBand {
    fn default() -> Self {
        Self::symmetric(0.05)
    }
}

/// Connects every pair of vertices whose distance is close to the short side.
///
/// This is a nearest-neighbor graph with a tolerance: correct for shapes
/// whose short edges are all (nearly) the same length, such as an
/// icosahedron and its midpoint refinements.
#[derive(Debug)]
pub struct BuildEdges {
    short_side: f64,
    band: ToleranceBand,
}

impl BuildEdges {
    /// Creates a new `BuildEdges` operation with the default band.
    #[must_use]
    pub fn new(short_side: f64) -> Self {
        Self {
            short_side,
            band: ToleranceBand::default(),
        }
    }

    /// Replaces the tolerance band.
    #[must_use]
    pub fn with_band(mut self, band: ToleranceBand) -> Self {
        self.band = band;
        self
    }

    /// Executes the scan over all unordered vertex pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InsufficientVertices`] if the store holds
    /// fewer than 2 vertices.
    pub fn execute(&self, store: &VertexStore) -> Result<EdgeList, GeometryError> {
        let positions = store.positions();
        if positions.len() < 2 {
            return Err(GeometryError::InsufficientVertices {
                count: positions.len(),
            });
        }

        let mut edges = EdgeList::new();
        for (i, p) in positions.iter().enumerate() {
            for (j, q) in positions.iter().enumerate().skip(i + 1) {
                if self.band.contains(distance(p, q), self.short_side) {
                    edges.insert(Edge::new(VertexId(i), VertexId(j)));
                }
            }
        }
        debug!(
            vertices = positions.len(),
            edges = edges.len(),
            short_side = self.short_side,
            "built edges"
        );
        Ok(edges)
    }
}
