mod build_edges;
mod project_sphere;
mod refine;
mod short_side;

pub use build_edges::{BuildEdges, ToleranceBand};
pub use project_sphere::ProjectToSphere;
pub use refine::Refine;
pub use short_side::ShortSide;
