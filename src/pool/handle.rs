use crate::math::{Point3, UnitQuaternion, Vector3};

use super::ResourceKind;

slotmap::new_key_type! {
    /// Unique identifier for a pooled handle.
    pub struct HandleId;
}

/// Placement of a pooled visual in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Point3,
    pub rotation: UnitQuaternion,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
        }
    }
}

/// Consumer-visible state of a pooled resource.
#[derive(Debug, Clone)]
pub struct HandleData {
    /// The kind of pool that owns this handle.
    pub kind: ResourceKind,
    /// Whether the resource is currently shown.
    pub active: bool,
    /// Current placement.
    pub transform: Transform,
}

impl HandleData {
    pub(super) fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            active: false,
            transform: Transform::default(),
        }
    }

    /// Puts the handle into its freshly-issued state.
    pub(super) fn activate(&mut self) {
        self.active = true;
        self.transform.scale = Vector3::repeat(1.0);
        self.transform.rotation = UnitQuaternion::identity();
    }

    /// Clears all transient state before the handle goes back on the free list.
    pub(super) fn deactivate(&mut self) {
        self.active = false;
        self.transform = Transform::default();
    }
}

/// Per-kind defaults applied to issued handles on request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindTemplate {
    /// Local scale the visual is authored with.
    pub scale: Vector3,
}

impl KindTemplate {
    /// Creates a template with a uniform scale.
    #[must_use]
    pub fn uniform(scale: f64) -> Self {
        Self {
            scale: Vector3::repeat(scale),
        }
    }
}

impl Default for KindTemplate {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}
