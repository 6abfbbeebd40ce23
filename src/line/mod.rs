//! Volumetric lines
//!
//! [`VolumetricLine`] keeps a line's endpoints and appearance and mirrors
//! them onto its own [`LineMesh`](crate::resources::LineMesh) and
//! [`MaterialInstance`](crate::resources::MaterialInstance). The shader that
//! turns those into a glowing beam is not part of this crate.

mod binder;

pub use binder::*;
