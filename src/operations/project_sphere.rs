use crate::error::{GeometryError, IcosaError, OperationError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::pool::ResourcePool;
use crate::topology::{VertexId, VertexStore};

/// Pushes every vertex onto a sphere centred at the origin.
///
/// Only positions change; edges are left as they are.
#[derive(Debug)]
pub struct ProjectToSphere {
    radius: f64,
}

impl ProjectToSphere {
    /// Creates a new `ProjectToSphere` operation.
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Computes the projected position of every vertex, indexed by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or a vertex sits at the
    /// origin.
    pub fn targets(&self, store: &VertexStore) -> Result<Vec<Point3>> {
        if self.radius.is_nan() || self.radius <= TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "sphere radius must be positive, got {}",
                self.radius
            ))
            .into());
        }
        store
            .iter()
            .map(|v| {
                v.position
                    .coords
                    .try_normalize(TOLERANCE)
                    .map(|dir| Point3::from(dir * self.radius))
                    .ok_or_else(|| IcosaError::from(GeometryError::ZeroVector))
            })
            .collect()
    }

    /// Executes the projection in place.
    ///
    /// # Errors
    ///
    /// Same as [`targets`](Self::targets); on error no vertex is moved.
    pub fn execute(&self, store: &mut VertexStore, pool: &mut ResourcePool) -> Result<()> {
        let targets = self.targets(store)?;
        for (i, target) in targets.into_iter().enumerate() {
            store.set_position(pool, VertexId(i), target)?;
        }
        Ok(())
    }
}
