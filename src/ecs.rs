//! `bevy_ecs` integration
//!
//! Entities carrying a [`VolumetricLine`] and a [`Transform`] are activated
//! the first frame they are seen and get their scale uniform refreshed on
//! frames where the transform changed. Despawning the entity drops the line,
//! which releases its material.

use bevy_ecs::prelude::*;

use crate::line::VolumetricLine;
use crate::scene::Transform;

/// Activate lines added since the last run.
pub fn activate_volumetric_lines(
    mut lines: Query<(&mut VolumetricLine, &Transform), Added<VolumetricLine>>,
) {
    for (mut line, transform) in &mut lines {
        line.activate(&transform.matrix());
    }
}

/// Per-frame check, fed by the transform's change detection.
///
/// Lines whose transform did not change are not touched, so they stay out of
/// `Changed<VolumetricLine>`.
pub fn update_volumetric_line_scale(
    mut lines: Query<(&mut VolumetricLine, &Transform), Changed<Transform>>,
) {
    for (mut line, transform) in &mut lines {
        line.tick(&transform.matrix(), true);
    }
}

/// Register the line systems, activation first.
pub fn add_volumetric_line_systems(schedule: &mut Schedule) {
    schedule.add_systems((activate_volumetric_lines, update_volumetric_line_scale).chain());
}
