mod handle;

pub use handle::{HandleData, HandleId, KindTemplate, Transform};

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::{HashMap, HashSet};
use slotmap::SlotMap;
use tracing::debug;

use crate::error::PoolError;

/// Tag identifying which category of reusable handle a pool manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A point marker drawn at each vertex.
    VertexVisual,
    /// A thin segment drawn along each edge.
    EdgeVisual,
}

impl ResourceKind {
    /// Template used when a pool is created without an explicit one.
    #[must_use]
    pub fn default_template(self) -> KindTemplate {
        match self {
            Self::VertexVisual => KindTemplate::uniform(0.1),
            Self::EdgeVisual => KindTemplate::uniform(1.0),
        }
    }
}

/// A resource pool shared between the engine and the scene layer.
pub type SharedPool = Rc<RefCell<ResourcePool>>;

#[derive(Debug)]
struct PoolEntry {
    template: KindTemplate,
    available: Vec<HandleId>,
    issued: HashSet<HandleId>,
}

/// Reuse pool for expensive-to-create handles, one free list per kind.
///
/// Every handle is either on exactly one free list or in exactly one issued
/// set. Pools grow on demand and are never shrunk.
#[derive(Debug, Default)]
pub struct ResourcePool {
    handles: SlotMap<HandleId, HandleData>,
    pools: HashMap<ResourceKind, PoolEntry>,
}

impl ResourcePool {
    /// Creates a pool with no kinds registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the pool for sharing between engine instances.
    #[must_use]
    pub fn shared(self) -> SharedPool {
        Rc::new(RefCell::new(self))
    }

    /// Creates a pool for `kind` with its default template and `prewarm` handles.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::DuplicateKind`] if `kind` already has a pool.
    pub fn create_pool(&mut self, kind: ResourceKind, prewarm: usize) -> Result<(), PoolError> {
        self.create_pool_with_template(kind, kind.default_template(), prewarm)
    }

    /// Creates a pool for `kind` with an explicit template.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::DuplicateKind`] if `kind` already has a pool.
    pub fn create_pool_with_template(
        &mut self,
        kind: ResourceKind,
        template: KindTemplate,
        prewarm: usize,
    ) -> Result<(), PoolError> {
        if self.pools.contains_key(&kind) {
            return Err(PoolError::DuplicateKind(kind));
        }
        let available = (0..prewarm)
            .map(|_| self.handles.insert(HandleData::new(kind)))
            .collect();
        self.pools.insert(
            kind,
            PoolEntry {
                template,
                available,
                issued: HashSet::new(),
            },
        );
        debug!(?kind, prewarm, "created pool");
        Ok(())
    }

    /// Returns `true` if a pool exists for `kind`.
    #[must_use]
    pub fn has_pool(&self, kind: ResourceKind) -> bool {
        self.pools.contains_key(&kind)
    }

    /// Issues a handle of `kind`, growing the pool when none is available.
    ///
    /// The handle comes back active with unit scale and identity rotation;
    /// its position is whatever the caller last left it at (the origin for
    /// recycled handles).
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::UnknownKind`] if `kind` has no pool.
    pub fn acquire(&mut self, kind: ResourceKind) -> Result<HandleId, PoolError> {
        let entry = self
            .pools
            .get_mut(&kind)
            .ok_or(PoolError::UnknownKind(kind))?;
        let id = match entry.available.pop() {
            Some(id) => id,
            None => {
                debug!(?kind, "pool exhausted, growing");
                self.handles.insert(HandleData::new(kind))
            }
        };
        entry.issued.insert(id);
        if let Some(data) = self.handles.get_mut(id) {
            data.activate();
        }
        Ok(id)
    }

    /// Returns an issued handle to the free list of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::UnknownKind`] if `kind` has no pool, or
    /// [`PoolError::NotIssued`] if `handle` is not currently issued by it.
    pub fn release(&mut self, kind: ResourceKind, handle: HandleId) -> Result<(), PoolError> {
        let entry = self
            .pools
            .get_mut(&kind)
            .ok_or(PoolError::UnknownKind(kind))?;
        if !entry.issued.remove(&handle) {
            return Err(PoolError::NotIssued(kind));
        }
        if let Some(data) = self.handles.get_mut(handle) {
            data.deactivate();
        }
        entry.available.push(handle);
        Ok(())
    }

    /// Sets an issued handle's scale to the template scale of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if `kind` has no pool or `handle` is not issued by it.
    pub fn apply_template_scale(
        &mut self,
        kind: ResourceKind,
        handle: HandleId,
    ) -> Result<(), PoolError> {
        let entry = self.pools.get(&kind).ok_or(PoolError::UnknownKind(kind))?;
        if !entry.issued.contains(&handle) {
            return Err(PoolError::NotIssued(kind));
        }
        let scale = entry.template.scale;
        self.handle_mut(handle)?.transform.scale = scale;
        Ok(())
    }

    /// Returns the state of a handle.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::UnknownHandle`] if the handle was not created here.
    pub fn handle(&self, id: HandleId) -> Result<&HandleData, PoolError> {
        self.handles.get(id).ok_or(PoolError::UnknownHandle)
    }

    /// Returns the mutable state of a handle.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::UnknownHandle`] if the handle was not created here.
    pub fn handle_mut(&mut self, id: HandleId) -> Result<&mut HandleData, PoolError> {
        self.handles.get_mut(id).ok_or(PoolError::UnknownHandle)
    }

    /// Number of handles of `kind` waiting on the free list.
    #[must_use]
    pub fn available_count(&self, kind: ResourceKind) -> usize {
        self.pools.get(&kind).map_or(0, |e| e.available.len())
    }

    /// Number of handles of `kind` currently held by consumers.
    #[must_use]
    pub fn issued_count(&self, kind: ResourceKind) -> usize {
        self.pools.get(&kind).map_or(0, |e| e.issued.len())
    }

    /// Number of handles of `kind` ever created.
    #[must_use]
    pub fn total_count(&self, kind: ResourceKind) -> usize {
        self.available_count(kind) + self.issued_count(kind)
    }
}
