//! Scene management

mod transform;

pub use transform::*;
