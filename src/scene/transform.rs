//! Transform component

use bevy_ecs::prelude::*;
use glam::{Mat4, Quat, Vec3};

/// Transform component for positioning objects in 3D space
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Get the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// World matrix of this transform under an optional parent world matrix
    pub fn world_matrix(&self, parent: Option<&Mat4>) -> Mat4 {
        match parent {
            Some(parent) => *parent * self.matrix(),
            None => self.matrix(),
        }
    }

    /// Line scale factor for this transform when it has no parent
    pub fn line_width_scale(&self) -> f32 {
        line_width_scale(&self.matrix())
    }
}

/// Scalar the line shader multiplies its width by to stay consistent under scaling.
///
/// Averages the lengths of the world X and Y basis vectors (the lossy world
/// scale). Shear or non-uniform parent scale is folded into those lengths, so
/// the result stays positive and equals `s` under a uniform scale `s`.
pub fn line_width_scale(world: &Mat4) -> f32 {
    let sx = world.x_axis.truncate().length();
    let sy = world.y_axis.truncate().length();
    (sx + sy) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_scale() {
        assert_eq!(Transform::default().line_width_scale(), 1.0);
    }

    #[test]
    fn test_uniform_scale() {
        let t = Transform::from_position_scale(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(2.0));
        assert!((t.line_width_scale() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_does_not_change_scale() {
        let t = Transform::new()
            .with_rotation(Quat::from_rotation_z(0.7))
            .with_scale(Vec3::splat(3.0));
        assert!((t.line_width_scale() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_non_uniform_parent_scale() {
        let parent = Mat4::from_scale(Vec3::new(2.0, 4.0, 8.0));
        let child = Transform::new();
        let world = child.world_matrix(Some(&parent));
        assert!((line_width_scale(&world) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_scale_is_positive() {
        let t = Transform::new().with_scale(Vec3::new(-2.0, 2.0, 1.0));
        assert!((t.line_width_scale() - 2.0).abs() < 1e-6);
    }
}
