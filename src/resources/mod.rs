//! Resource management
//!
//! Per-instance line meshes and materials, plus the constant tables every
//! line mesh shares.

mod material;
mod mesh;

pub use material::*;
pub use mesh::*;
