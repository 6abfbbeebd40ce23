//! Configuration for volumetric line instances

use glam::{Vec3, Vec4};

use crate::error::{LineError, LineResult};

/// How negative line widths are treated when written to the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthPolicy {
    /// Pass the width through unchanged (negative values only produce artifacts)
    #[default]
    Permissive,
    /// Clamp negative widths to zero before writing them
    ClampToZero,
}

impl WidthPolicy {
    /// Resolve the width that actually reaches the material.
    pub fn apply(&self, width: f32) -> f32 {
        match self {
            Self::Permissive => {
                if width < 0.0 {
                    log::warn!("Negative volumetric line width {} written as-is", width);
                }
                width
            }
            Self::ClampToZero => width.max(0.0),
        }
    }
}

/// Initial state of a volumetric line
#[derive(Debug, Clone, PartialEq)]
pub struct VolumetricLineConfig {
    /// Start point in object space
    pub start: Vec3,
    /// End point in object space
    pub end: Vec3,
    /// Beam color (RGBA)
    pub color: Vec4,
    /// Beam width in object units
    pub width: f32,
    /// Fraction of the beam core rendered white
    pub light_saber_factor: f32,
    /// Keep the template's authored color/width/factor on activation
    pub preserve_template_properties: bool,
    /// Treatment of negative widths
    pub width_policy: WidthPolicy,
    /// Optional debug label for the mesh and material
    pub label: Option<String>,
}

impl Default for VolumetricLineConfig {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            end: Vec3::new(0.0, 0.0, 100.0),
            color: Vec4::ONE,
            width: 1.0,
            light_saber_factor: 0.9,
            preserve_template_properties: false,
            width_policy: WidthPolicy::Permissive,
            label: None,
        }
    }
}

impl VolumetricLineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(mut self, start: Vec3, end: Vec3) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_light_saber_factor(mut self, factor: f32) -> Self {
        self.light_saber_factor = factor;
        self
    }

    pub fn with_preserve_template_properties(mut self, preserve: bool) -> Self {
        self.preserve_template_properties = preserve;
        self
    }

    pub fn with_width_policy(mut self, policy: WidthPolicy) -> Self {
        self.width_policy = policy;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Reject values that can never render (NaN or infinite components).
    ///
    /// Negative widths and zero-length segments are accepted.
    pub fn validate(&self) -> LineResult<()> {
        if !self.start.is_finite() {
            return Err(LineError::InvalidConfig(format!(
                "start point is not finite: {}",
                self.start
            )));
        }
        if !self.end.is_finite() {
            return Err(LineError::InvalidConfig(format!(
                "end point is not finite: {}",
                self.end
            )));
        }
        if !self.color.is_finite() {
            return Err(LineError::InvalidConfig(format!(
                "color is not finite: {}",
                self.color
            )));
        }
        if !self.width.is_finite() {
            return Err(LineError::InvalidConfig(format!(
                "width is not finite: {}",
                self.width
            )));
        }
        if !self.light_saber_factor.is_finite() {
            return Err(LineError::InvalidConfig(format!(
                "light saber factor is not finite: {}",
                self.light_saber_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VolumetricLineConfig::default();
        assert_eq!(config.start, Vec3::ZERO);
        assert_eq!(config.end, Vec3::new(0.0, 0.0, 100.0));
        assert_eq!(config.width, 1.0);
        assert!(!config.preserve_template_properties);
        assert_eq!(config.width_policy, WidthPolicy::Permissive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_degenerate_segment_is_valid() {
        let config = VolumetricLineConfig::new()
            .with_endpoints(Vec3::ONE, Vec3::ONE)
            .with_width(-2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = VolumetricLineConfig::new().with_width(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(LineError::InvalidConfig(_))
        ));

        let config =
            VolumetricLineConfig::new().with_endpoints(Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_width_policy() {
        assert_eq!(WidthPolicy::Permissive.apply(-1.5), -1.5);
        assert_eq!(WidthPolicy::ClampToZero.apply(-1.5), 0.0);
        assert_eq!(WidthPolicy::ClampToZero.apply(3.0), 3.0);
    }
}
