//! Volumetric Lines - camera-facing beams for a render-graph engine
//!
//! A volumetric line is a segment drawn as a screen-aligned ribbon whose
//! shading fakes a glowing cylinder. This crate owns the CPU side:
//! - An 8-vertex mesh per line, with texcoord/offset/index tables shared by all lines
//! - A material instance per line, duplicated from a read-only template
//! - The activate / tick / teardown lifecycle that keeps both in sync
//! - A debug overlay and `bevy_ecs` systems driving the lifecycle
//!
//! # Example
//!
//! ```ignore
//! let template = Arc::new(Material::volumetric_line());
//! let config = VolumetricLineConfig::new().with_endpoints(Vec3::ZERO, Vec3::Y * 10.0);
//! let mut line = VolumetricLine::from_config(config, Some(template))?;
//!
//! line.activate(&transform.matrix());
//! // every frame
//! line.tick(&transform.matrix(), transform_changed);
//! // end of life
//! line.teardown();
//! ```

pub mod config;
pub mod debug;
pub mod ecs;
pub mod error;
pub mod line;
pub mod resources;
pub mod scene;

pub use config::{VolumetricLineConfig, WidthPolicy};
pub use error::{LineError, LineResult};
pub use line::{LineProperties, LineState, VolumetricLine};
pub use resources::{LineMesh, Material, MaterialInstance};
pub use scene::Transform;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
