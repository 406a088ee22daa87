use std::fmt;

use crate::engine::{CommandSet, EngineParams, MorphPhase, SubdivisionEngine};
use crate::error::Result;
use crate::pool::{ResourcePool, SharedPool};

use super::EdgeVisuals;

/// Counts shown next to the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneInfo {
    pub points: usize,
    pub edges: usize,
}

impl fmt::Display for SceneInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINTS = {}\nEDGES = {}", self.points, self.edges)
    }
}

/// A subdivision engine wired to pooled edge visuals.
///
/// Every command forwards to the engine and then replays its events into
/// the visuals, so the drawn edges always match what the engine reported.
#[derive(Debug)]
pub struct Scene {
    engine: SubdivisionEngine,
    edges: EdgeVisuals,
}

impl Scene {
    /// Creates both pools, builds the seed shape and draws it.
    ///
    /// # Errors
    ///
    /// Returns an error if the pools or the seed shape cannot be set up.
    pub fn new(params: EngineParams) -> Result<Self> {
        Self::with_pool(params, ResourcePool::new().shared())
    }

    /// Like [`new`](Self::new) but draws from an existing pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pools or the seed shape cannot be set up.
    pub fn with_pool(params: EngineParams, pool: SharedPool) -> Result<Self> {
        let edges = EdgeVisuals::new(pool.clone(), params.edge_prewarm, params.edge_thickness)?;
        let engine = SubdivisionEngine::build(params, pool)?;
        let mut scene = Self { engine, edges };
        scene.sync()?;
        Ok(scene)
    }

    /// # Errors
    ///
    /// See [`SubdivisionEngine::reset`].
    pub fn reset(&mut self) -> Result<()> {
        self.engine.reset()?;
        self.sync()
    }

    /// # Errors
    ///
    /// See [`SubdivisionEngine::subdivide_step`].
    pub fn subdivide(&mut self) -> Result<()> {
        self.engine.subdivide_step()?;
        self.sync()
    }

    /// Starts the animated morph onto the sphere.
    ///
    /// # Errors
    ///
    /// See [`SubdivisionEngine::begin_sphere_morph`].
    pub fn to_sphere(&mut self) -> Result<()> {
        self.engine.begin_sphere_morph()?;
        self.sync()
    }

    /// Advances the morph clock by `dt` seconds.
    ///
    /// # Errors
    ///
    /// See [`SubdivisionEngine::advance`].
    pub fn tick(&mut self, dt: f64) -> Result<MorphPhase> {
        let phase = self.engine.advance(dt)?;
        self.sync()?;
        Ok(phase)
    }

    fn sync(&mut self) -> Result<()> {
        for event in self.engine.drain_events() {
            self.edges.apply(&event, self.engine.vertices())?;
        }
        Ok(())
    }

    #[must_use]
    pub fn info(&self) -> SceneInfo {
        SceneInfo {
            points: self.engine.vertex_count(),
            edges: self.edges.len(),
        }
    }

    #[must_use]
    pub fn commands(&self) -> CommandSet {
        self.engine.commands()
    }

    #[must_use]
    pub fn engine(&self) -> &SubdivisionEngine {
        &self.engine
    }

    #[must_use]
    pub fn edge_visuals(&self) -> &EdgeVisuals {
        &self.edges
    }
}
