//! Headless visual layer: pooled edge segments driven by engine events.

mod edge_visuals;
mod scene;

pub use edge_visuals::{segment_transform, EdgeVisuals};
pub use scene::{Scene, SceneInfo};
