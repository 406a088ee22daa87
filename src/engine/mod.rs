mod events;
mod morph;
mod params;

pub use events::{CommandSet, EngineEvent};
pub use morph::{ease_out_circ, MorphFrame, MorphPhase, SphereMorph};
pub use params::{EngineParams, MorphTiming};

use tracing::{debug, info};

use crate::error::{GeometryError, OperationError, Result};
use crate::math::Point3;
use crate::operations::{BuildEdges, ProjectToSphere, Refine, ShortSide};
use crate::pool::{ResourceKind, ResourcePool, SharedPool};
use crate::topology::{EdgeList, VertexId, VertexStore};

/// Coarse workflow state of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing has been built yet.
    Empty,
    /// A shape exists and `stage` subdivide steps have run since it was built.
    Subdivided { stage: u32 },
}

/// Builds the seed shape and drives reset / subdivide / project-to-sphere.
///
/// Mutating commands take `&mut self`; the pool is shared through
/// [`SharedPool`], so an engine never leaves the thread that created it.
#[derive(Debug)]
pub struct SubdivisionEngine {
    params: EngineParams,
    pool: SharedPool,
    store: VertexStore,
    edges: EdgeList,
    short_side: f64,
    stage: u32,
    built: bool,
    morph: SphereMorph,
    events: Vec<EngineEvent>,
}

impl SubdivisionEngine {
    /// Creates an empty engine, registering the vertex visual pool if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex pool cannot be created.
    pub fn new(params: EngineParams, pool: SharedPool) -> Result<Self> {
        {
            let mut p = pool.borrow_mut();
            if !p.has_pool(ResourceKind::VertexVisual) {
                p.create_pool(ResourceKind::VertexVisual, params.vertex_prewarm)?;
            }
        }
        Ok(Self {
            params,
            pool,
            store: VertexStore::new(),
            edges: EdgeList::new(),
            short_side: 0.0,
            stage: 0,
            built: false,
            morph: SphereMorph::default(),
            events: Vec::new(),
        })
    }

    /// Creates an engine and builds the configured seed shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool or the seed shape cannot be set up.
    pub fn build(params: EngineParams, pool: SharedPool) -> Result<Self> {
        let mut engine = Self::new(params, pool)?;
        engine.reset()?;
        Ok(engine)
    }

    /// Rebuilds the store from `seed` and connects it by short-side threshold.
    ///
    /// The new shape is assembled off to the side; on error the previous
    /// shape is kept.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InsufficientVertices`] for fewer than 2 seed
    /// points and [`OperationError::CommandDisabled`] while a morph is running.
    pub fn initialize(&mut self, seed: &[Point3]) -> Result<()> {
        if seed.len() < 2 {
            return Err(GeometryError::InsufficientVertices { count: seed.len() }.into());
        }
        if self.morph.phase() == MorphPhase::Animating {
            return Err(OperationError::CommandDisabled("reset").into());
        }

        let mut pool = self.pool.borrow_mut();
        let mut store = VertexStore::new();
        let (edges, short_side) = match seed_shape(&self.params, &mut pool, &mut store, seed) {
            Ok(shape) => shape,
            Err(err) => {
                store.clear(&mut pool)?;
                return Err(err);
            }
        };
        self.store.clear(&mut pool)?;
        drop(pool);

        self.store = store;
        self.edges = edges;
        self.short_side = short_side;
        self.stage = 0;
        self.built = true;
        self.morph.reset();

        self.events.push(EngineEvent::EdgesCleared);
        self.events.push(EngineEvent::VerticesCleared);
        self.push_added_since(0);
        self.events
            .push(EngineEvent::EdgesReplaced(self.edges.as_slice().to_vec()));
        info!(
            vertices = self.store.len(),
            edges = self.edges.len(),
            "built shape"
        );
        Ok(())
    }

    /// Rebuilds the configured seed shape, dropping all subdivisions.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::CommandDisabled`] while a morph is running.
    pub fn reset(&mut self) -> Result<()> {
        let seed = self.params.seed();
        self.initialize(&seed)
    }

    /// Splits every edge, then reconnects the grown cloud by threshold.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::MaxStageReached`] once `max_stage` steps have
    /// run, [`OperationError::CommandDisabled`] after a projection started,
    /// and [`OperationError::NotBuilt`] before the first build. Counts are
    /// unchanged on error.
    pub fn subdivide_step(&mut self) -> Result<()> {
        if !self.built {
            return Err(OperationError::NotBuilt.into());
        }
        if self.morph.phase() != MorphPhase::Idle {
            return Err(OperationError::CommandDisabled("subdivide").into());
        }
        if self.stage >= self.params.max_stage {
            return Err(OperationError::MaxStageReached {
                max: self.params.max_stage,
            }
            .into());
        }

        let before = self.store.len();
        let mut pool = self.pool.borrow_mut();
        let refined = Refine::new(&self.edges).execute(&mut self.store, &mut pool)?;
        drop(pool);
        let short_side = ShortSide::new().execute(&self.store)?;
        let edges = BuildEdges::new(short_side)
            .with_band(self.params.band)
            .execute(&self.store)?;
        debug!(
            split = refined.len(),
            rebuilt = edges.len(),
            "threshold edges after refine"
        );

        self.edges = edges;
        self.short_side = short_side;
        self.stage += 1;

        self.push_added_since(before);
        self.events
            .push(EngineEvent::EdgesReplaced(self.edges.as_slice().to_vec()));
        info!(
            stage = self.stage,
            vertices = self.store.len(),
            edges = self.edges.len(),
            "subdivided"
        );
        Ok(())
    }

    /// Moves every vertex onto the sphere of the configured radius at once.
    ///
    /// The edge list is kept. The first projection of a shape also asks for
    /// the edges to be redrawn; later calls only report moved vertices.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotBuilt`] before the first build,
    /// [`OperationError::CommandDisabled`] while a morph is running, and
    /// [`GeometryError::ZeroVector`] if a vertex sits at the origin.
    pub fn project_to_sphere(&mut self) -> Result<()> {
        if !self.built {
            return Err(OperationError::NotBuilt.into());
        }
        let first = match self.morph.phase() {
            MorphPhase::Animating => {
                return Err(OperationError::CommandDisabled("to_sphere").into());
            }
            MorphPhase::Idle => true,
            MorphPhase::Settled => false,
        };

        let mut pool = self.pool.borrow_mut();
        ProjectToSphere::new(self.params.sphere_radius).execute(&mut self.store, &mut pool)?;
        drop(pool);

        if first {
            self.events.push(EngineEvent::EdgesCleared);
        }
        self.events.push(EngineEvent::VerticesMoved);
        if first {
            self.settle();
        }
        Ok(())
    }

    /// Starts the animated morph onto the sphere.
    ///
    /// Edge visuals are taken down now and redrawn once, when
    /// [`advance`](Self::advance) reports the morph settled. Calling this
    /// again after it settled does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotBuilt`] before the first build,
    /// [`OperationError::CommandDisabled`] while already animating, and
    /// [`GeometryError::ZeroVector`] if a vertex sits at the origin.
    pub fn begin_sphere_morph(&mut self) -> Result<()> {
        if !self.built {
            return Err(OperationError::NotBuilt.into());
        }
        match self.morph.phase() {
            MorphPhase::Animating => {
                return Err(OperationError::CommandDisabled("to_sphere").into());
            }
            MorphPhase::Settled => return Ok(()),
            MorphPhase::Idle => {}
        }

        let targets = ProjectToSphere::new(self.params.sphere_radius).targets(&self.store)?;
        self.morph
            .start(self.params.morph, self.store.positions(), targets);
        self.events.push(EngineEvent::EdgesCleared);
        info!(vertices = self.store.len(), "sphere morph started");
        Ok(())
    }

    /// Advances a running morph by `dt` seconds and returns its phase.
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex visual has gone missing from the pool.
    pub fn advance(&mut self, dt: f64) -> Result<MorphPhase> {
        let Some(frame) = self.morph.advance(dt) else {
            return Ok(self.morph.phase());
        };

        let mut pool = self.pool.borrow_mut();
        for (i, position) in frame.positions.into_iter().enumerate() {
            self.store.set_position(&mut pool, VertexId(i), position)?;
        }
        drop(pool);

        self.events.push(EngineEvent::VerticesMoved);
        if frame.settled {
            self.settle();
        }
        Ok(self.morph.phase())
    }

    fn settle(&mut self) {
        self.morph.mark_settled();
        self.events
            .push(EngineEvent::EdgesReplaced(self.edges.as_slice().to_vec()));
        info!(edges = self.edges.len(), "settled on sphere");
    }

    fn push_added_since(&mut self, first: usize) {
        self.events.extend(self.store.iter().skip(first).map(|v| {
            EngineEvent::VertexAdded {
                id: v.id,
                position: v.position,
            }
        }));
    }

    /// Commands accepted in the current state.
    #[must_use]
    pub fn commands(&self) -> CommandSet {
        match (self.built, self.morph.phase()) {
            (_, MorphPhase::Animating) => CommandSet::NONE,
            (false, _) => CommandSet::new(true, false, false),
            (true, MorphPhase::Settled) => CommandSet::new(true, false, false),
            (true, MorphPhase::Idle) => {
                CommandSet::new(true, self.stage < self.params.max_stage, true)
            }
        }
    }

    /// Takes all events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.built {
            EngineState::Subdivided { stage: self.stage }
        } else {
            EngineState::Empty
        }
    }

    #[must_use]
    pub fn morph_phase(&self) -> MorphPhase {
        self.morph.phase()
    }

    #[must_use]
    pub fn stage(&self) -> u32 {
        self.stage
    }

    #[must_use]
    pub fn short_side(&self) -> f64 {
        self.short_side
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TopologyError::VertexNotFound`] for unknown ids.
    pub fn position(&self, id: VertexId) -> Result<Point3> {
        Ok(self.store.position(id)?)
    }

    #[must_use]
    pub fn vertices(&self) -> &VertexStore {
        &self.store
    }

    #[must_use]
    pub fn edges(&self) -> &EdgeList {
        &self.edges
    }

    #[must_use]
    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    #[must_use]
    pub fn pool(&self) -> &SharedPool {
        &self.pool
    }
}

impl Drop for SubdivisionEngine {
    fn drop(&mut self) {
        if let Ok(mut pool) = self.pool.try_borrow_mut() {
            let _ = self.store.clear(&mut pool);
        }
    }
}

fn seed_shape(
    params: &EngineParams,
    pool: &mut ResourcePool,
    store: &mut VertexStore,
    seed: &[Point3],
) -> Result<(EdgeList, f64)> {
    for p in seed {
        store.add(pool, *p)?;
    }
    let mut short_side = ShortSide::new().execute(store)?;
    let mut edges = BuildEdges::new(short_side)
        .with_band(params.band)
        .execute(store)?;
    if params.initial_refine {
        edges = Refine::new(&edges).execute(store, pool)?;
        short_side = ShortSide::new().execute(store)?;
    }
    Ok((edges, short_side))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::IcosaError;
    use crate::topology::Edge;
    use approx::assert_relative_eq;

    fn engine(params: EngineParams) -> SubdivisionEngine {
        SubdivisionEngine::build(params, ResourcePool::new().shared()).unwrap()
    }

    #[test]
    fn build_yields_icosahedron() {
        let mut e = engine(EngineParams::default());
        assert_eq!(e.vertex_count(), 12);
        assert_eq!(e.edge_count(), 30);
        assert_eq!(e.state(), EngineState::Subdivided { stage: 0 });
        assert_relative_eq!(e.short_side(), 2.0, epsilon = 1e-12);

        let seed = EngineParams::default().seed();
        for (i, v) in e.vertices().iter().enumerate() {
            assert_eq!(v.id, VertexId(i));
            assert_relative_eq!(v.position, seed[i]);
        }

        let events = e.drain_events();
        let added = events
            .iter()
            .filter(|ev| matches!(ev, EngineEvent::VertexAdded { .. }))
            .count();
        assert_eq!(added, 12);
        assert!(matches!(events.last(), Some(EngineEvent::EdgesReplaced(edges)) if edges.len() == 30));
        assert!(e.drain_events().is_empty());
    }

    #[test]
    fn initial_refine_option() {
        let e = engine(EngineParams::default().with_initial_refine(true));
        assert_eq!(e.vertex_count(), 42);
        assert_eq!(e.edge_count(), 60);
        assert_relative_eq!(e.short_side(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn subdivide_counts() {
        let mut e = engine(EngineParams::default());
        let expected = [(42, 120), (162, 480), (642, 1920)];
        for (stage, (v, ed)) in expected.into_iter().enumerate() {
            e.subdivide_step().unwrap();
            assert_eq!(e.stage(), u32::try_from(stage).unwrap() + 1);
            assert_eq!(e.vertex_count(), v);
            assert_eq!(e.edge_count(), ed);
        }
    }

    #[test]
    fn fourth_subdivide_fails_without_change() {
        let mut e = engine(EngineParams::default());
        for _ in 0..3 {
            e.subdivide_step().unwrap();
        }
        assert!(!e.commands().subdivide);
        let (v, ed) = (e.vertex_count(), e.edge_count());
        let err = e.subdivide_step().unwrap_err();
        assert!(matches!(
            err,
            IcosaError::Operation(OperationError::MaxStageReached { max: 3 })
        ));
        assert_eq!((e.vertex_count(), e.edge_count()), (v, ed));
    }

    #[test]
    fn reset_restores_build_counts_and_recycles_handles() {
        let mut e = engine(EngineParams::default().with_prewarm(16, 0));
        e.subdivide_step().unwrap();
        e.subdivide_step().unwrap();
        e.reset().unwrap();
        assert_eq!((e.vertex_count(), e.edge_count()), (12, 30));
        assert_eq!(e.stage(), 0);
        assert!(e.commands().subdivide);

        let pool = e.pool().borrow();
        assert_eq!(pool.issued_count(ResourceKind::VertexVisual), 12);
        assert_eq!(pool.total_count(ResourceKind::VertexVisual), 174);
    }

    #[test]
    fn projection_keeps_topology() {
        let mut e = engine(EngineParams::default().with_sphere_radius(3.0));
        e.subdivide_step().unwrap();
        let before = e.edges().clone();
        e.project_to_sphere().unwrap();
        for v in e.vertices().iter() {
            assert_relative_eq!(v.position.coords.norm(), 3.0, epsilon = 1e-12);
        }
        assert!(e.edges().same_edges(&before));
        assert_eq!(e.morph_phase(), MorphPhase::Settled);
        assert_eq!(e.commands(), CommandSet::new(true, false, false));
    }

    #[test]
    fn repeated_projection_redraws_once() {
        let mut e = engine(EngineParams::default());
        e.drain_events();
        e.project_to_sphere().unwrap();
        e.project_to_sphere().unwrap();
        let redraws = e
            .drain_events()
            .iter()
            .filter(|ev| matches!(ev, EngineEvent::EdgesReplaced(_)))
            .count();
        assert_eq!(redraws, 1);
    }

    #[test]
    fn subdivide_disabled_after_projection() {
        let mut e = engine(EngineParams::default());
        e.project_to_sphere().unwrap();
        assert!(matches!(
            e.subdivide_step().unwrap_err(),
            IcosaError::Operation(OperationError::CommandDisabled("subdivide"))
        ));
        e.reset().unwrap();
        assert_eq!(e.morph_phase(), MorphPhase::Idle);
        e.subdivide_step().unwrap();
    }

    #[test]
    fn morph_settles_once_and_gates_commands() {
        let mut e = engine(EngineParams::default().with_morph(MorphTiming {
            delay: 0.5,
            duration: 1.0,
        }));
        e.subdivide_step().unwrap();
        e.drain_events();

        e.begin_sphere_morph().unwrap();
        assert_eq!(e.commands(), CommandSet::NONE);
        assert!(e.reset().is_err());
        assert!(e.begin_sphere_morph().is_err());

        assert_eq!(e.advance(0.25).unwrap(), MorphPhase::Animating);
        assert_eq!(e.advance(0.5).unwrap(), MorphPhase::Animating);
        assert_eq!(e.advance(1.0).unwrap(), MorphPhase::Settled);
        assert_eq!(e.advance(1.0).unwrap(), MorphPhase::Settled);
        e.begin_sphere_morph().unwrap();

        let events = e.drain_events();
        assert_eq!(events.first(), Some(&EngineEvent::EdgesCleared));
        let redraws: Vec<_> = events
            .iter()
            .filter_map(|ev| match ev {
                EngineEvent::EdgesReplaced(edges) => Some(edges.len()),
                _ => None,
            })
            .collect();
        assert_eq!(redraws, vec![120]);
        for v in e.vertices().iter() {
            assert_relative_eq!(v.position.coords.norm(), 2.0, epsilon = 1e-12);
        }
        assert_eq!(e.commands(), CommandSet::new(true, false, false));
    }

    #[test]
    fn short_seed_rejected_and_shape_kept() {
        let mut e = engine(EngineParams::default());
        let err = e.initialize(&[Point3::origin()]).unwrap_err();
        assert!(matches!(
            err,
            IcosaError::Geometry(GeometryError::InsufficientVertices { count: 1 })
        ));
        assert_eq!(e.vertex_count(), 12);
    }

    #[test]
    fn empty_engine_rejects_commands() {
        let mut e = SubdivisionEngine::new(EngineParams::default(), ResourcePool::new().shared())
            .unwrap();
        assert_eq!(e.state(), EngineState::Empty);
        assert!(e.subdivide_step().is_err());
        assert!(e.project_to_sphere().is_err());
        assert_eq!(e.commands(), CommandSet::new(true, false, false));
    }

    #[test]
    fn engines_share_a_pool() {
        let pool = ResourcePool::new().shared();
        let a = SubdivisionEngine::build(EngineParams::default(), pool.clone()).unwrap();
        let b = SubdivisionEngine::build(EngineParams::default(), pool.clone()).unwrap();
        assert_eq!(pool.borrow().issued_count(ResourceKind::VertexVisual), 24);
        drop(a);
        assert_eq!(pool.borrow().issued_count(ResourceKind::VertexVisual), 12);
        assert_eq!(b.vertex_count(), 12);
    }

    #[test]
    fn edges_reference_existing_vertices() {
        let mut e = engine(EngineParams::default());
        e.subdivide_step().unwrap();
        let n = e.vertex_count();
        assert!(e
            .edges()
            .iter()
            .all(|edge: &Edge| edge.b().index() < n && edge.a() < edge.b()));
    }
}
