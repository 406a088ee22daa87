use nalgebra::distance;

use crate::engine::EngineEvent;
use crate::error::Result;
use crate::math::{midpoint, Point3, UnitQuaternion, Vector3, TOLERANCE};
use crate::pool::{HandleId, ResourceKind, SharedPool, Transform};
use crate::topology::{Edge, VertexStore};

/// Placement of a segment visual spanning `from`-`to`.
///
/// The visual is a unit box stretched along its local Z axis: it sits at the
/// midpoint, is `thickness` wide, and its Z axis points at `from`.
#[must_use]
pub fn segment_transform(from: &Point3, to: &Point3, thickness: f64) -> Transform {
    let center = midpoint(from, to);
    let dir = from - center;
    let up = if dir.cross(&Vector3::y()).norm() > TOLERANCE {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let rotation = if dir.norm() > TOLERANCE {
        UnitQuaternion::face_towards(&dir, &up)
    } else {
        UnitQuaternion::identity()
    };
    Transform {
        position: center,
        rotation,
        scale: Vector3::new(thickness, thickness, distance(from, to)),
    }
}

/// Pooled segment visuals mirroring the engine's current edge list.
#[derive(Debug)]
pub struct EdgeVisuals {
    pool: SharedPool,
    handles: Vec<HandleId>,
    thickness: f64,
}

impl EdgeVisuals {
    /// Creates an empty set, registering the edge visual pool if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge pool cannot be created.
    pub fn new(pool: SharedPool, prewarm: usize, thickness: f64) -> Result<Self> {
        {
            let mut p = pool.borrow_mut();
            if !p.has_pool(ResourceKind::EdgeVisual) {
                p.create_pool(ResourceKind::EdgeVisual, prewarm)?;
            }
        }
        Ok(Self {
            pool,
            handles: Vec::new(),
            thickness,
        })
    }

    /// Updates the visuals for one engine event.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge references a vertex missing from `store`
    /// or a handle cannot be returned to the pool.
    pub fn apply(&mut self, event: &EngineEvent, store: &VertexStore) -> Result<()> {
        match event {
            EngineEvent::EdgesCleared => self.clear(),
            EngineEvent::EdgesReplaced(edges) => {
                self.clear()?;
                for edge in edges {
                    self.connect(store, edge)?;
                }
                Ok(())
            }
            EngineEvent::VerticesCleared
            | EngineEvent::VertexAdded { .. }
            | EngineEvent::VerticesMoved => Ok(()),
        }
    }

    fn connect(&mut self, store: &VertexStore, edge: &Edge) -> Result<()> {
        let from = store.position(edge.a())?;
        let to = store.position(edge.b())?;
        let mut pool = self.pool.borrow_mut();
        let handle = pool.acquire(ResourceKind::EdgeVisual)?;
        pool.handle_mut(handle)?.transform = segment_transform(&from, &to, self.thickness);
        self.handles.push(handle);
        Ok(())
    }

    /// Returns every visual to the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if a handle is no longer issued.
    pub fn clear(&mut self) -> Result<()> {
        let mut pool = self.pool.borrow_mut();
        for handle in self.handles.drain(..) {
            pool.release(ResourceKind::EdgeVisual, handle)?;
        }
        Ok(())
    }

    /// Number of visuals currently drawn.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    #[must_use]
    pub fn handles(&self) -> &[HandleId] {
        &self.handles
    }
}

impl Drop for EdgeVisuals {
    fn drop(&mut self) {
        if let Ok(mut pool) = self.pool.try_borrow_mut() {
            for handle in self.handles.drain(..) {
                let _ = pool.release(ResourceKind::EdgeVisual, handle);
            }
        }
    }
}
