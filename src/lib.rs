pub mod engine;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod pool;
pub mod render;
pub mod topology;

pub use error::{IcosaError, Result};
