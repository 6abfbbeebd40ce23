//! Debug overlay drawing
//!
//! Lines queued here are not part of any scene. They are collected for one
//! frame and handed to whatever renders the editor overlay.
//!
//! ```ignore
//! let drawer = DebugDrawer::new();
//!
//! // Each frame:
//! drawer.advance_tick();
//! line.draw_gizmo(&world_matrix, &mut drawer.context());
//!
//! // At render time:
//! let lines = drawer.take_render_data();
//! ```

mod drawer;
mod vertex;

pub use drawer::{DebugDrawer, DebugDrawerContext, DebugLine};
pub use vertex::DebugVertex;

/// Color used for volumetric line gizmos
pub const GIZMO_COLOR: glam::Vec4 = glam::Vec4::new(0.0, 1.0, 0.0, 1.0);
