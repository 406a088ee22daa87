pub mod icosahedron;

pub use icosahedron::{icosahedron_seed, GOLDEN_RATIO};
