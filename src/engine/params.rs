//! Engine configuration.

use crate::geometry::{icosahedron_seed, GOLDEN_RATIO};
use crate::math::Point3;
use crate::operations::ToleranceBand;

/// Timing of the animated morph onto the sphere, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphTiming {
    /// Time before any vertex starts moving.
    pub delay: f64,
    /// Time from start of motion until every vertex is on the sphere.
    pub duration: f64,
}

impl Default for MorphTiming {
    fn default() -> Self {
        Self {
            delay: 1.4,
            duration: 1.4,
        }
    }
}

/// Parameters controlling shape construction and refinement.
#[derive(Debug, Clone)]
pub struct EngineParams {
    /// Ratio used for the seed coordinates `(0, ±1, ±phi)` and permutations.
    pub phi: f64,
    /// Vertex visuals created up front.
    pub vertex_prewarm: usize,
    /// Edge visuals created up front.
    pub edge_prewarm: usize,
    /// Band around the short side that counts as an edge.
    pub band: ToleranceBand,
    /// Number of subdivide steps allowed after a build.
    pub max_stage: u32,
    /// Radius of the sphere vertices are projected onto.
    pub sphere_radius: f64,
    /// Morph animation timing.
    pub morph: MorphTiming,
    /// Cross-section of the edge visuals.
    pub edge_thickness: f64,
    /// Run one structural refinement right after seeding.
    ///
    /// Off by default: a build shows the plain icosahedron (12 vertices,
    /// 30 edges) and the first subdivide step yields 42 vertices and 120
    /// edges. When on, a build yields 42 vertices and 60 edges.
    pub initial_refine: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            phi: GOLDEN_RATIO,
            vertex_prewarm: 700,
            edge_prewarm: 2000,
            band: ToleranceBand::default(),
            max_stage: 3,
            sphere_radius: 2.0,
            morph: MorphTiming::default(),
            edge_thickness: 0.02,
            initial_refine: false,
        }
    }
}

impl EngineParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_phi(mut self, phi: f64) -> Self {
        self.phi = phi;
        self
    }

    #[must_use]
    pub fn with_prewarm(mut self, vertices: usize, edges: usize) -> Self {
        self.vertex_prewarm = vertices;
        self.edge_prewarm = edges;
        self
    }

    #[must_use]
    pub fn with_band(mut self, band: ToleranceBand) -> Self {
        self.band = band;
        self
    }

    #[must_use]
    pub fn with_max_stage(mut self, max_stage: u32) -> Self {
        self.max_stage = max_stage;
        self
    }

    #[must_use]
    pub fn with_sphere_radius(mut self, radius: f64) -> Self {
        self.sphere_radius = radius;
        self
    }

    #[must_use]
    pub fn with_morph(mut self, morph: MorphTiming) -> Self {
        self.morph = morph;
        self
    }

    #[must_use]
    pub fn with_initial_refine(mut self, initial_refine: bool) -> Self {
        self.initial_refine = initial_refine;
        self
    }

    /// The seed points built on every reset.
    #[must_use]
    pub fn seed(&self) -> [Point3; 12] {
        icosahedron_seed(self.phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = EngineParams::default();
        assert_eq!(params.max_stage, 3);
        assert_eq!(params.vertex_prewarm, 700);
        assert_eq!(params.edge_prewarm, 2000);
        assert!(!params.initial_refine);
        assert_eq!(params.band, ToleranceBand::symmetric(0.05));
    }

    #[test]
    fn builders_override() {
        let params = EngineParams::new()
            .with_max_stage(1)
            .with_sphere_radius(5.0)
            .with_prewarm(1, 2);
        assert_eq!(params.max_stage, 1);
        assert!((params.sphere_radius - 5.0).abs() < f64::EPSILON);
        assert_eq!((params.vertex_prewarm, params.edge_prewarm), (1, 2));
    }
}
