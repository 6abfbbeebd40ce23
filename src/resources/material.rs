//! Line materials
//!
//! A template [`Material`] is authored once and shared read-only through an
//! `Arc`. Every line duplicates it into its own [`MaterialInstance`] so that
//! per-line uniforms never clobber each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::error::{LineError, LineResult};

/// Line width uniform, in object units
pub const LINE_WIDTH: &str = "_LineWidth";
/// Scale factor derived from the owning transform
pub const LINE_SCALE: &str = "_LineScale";
/// Fraction of the beam core rendered white
pub const LIGHT_SABER_FACTOR: &str = "_LightSaberFactor";

const DEFAULT_LINE_WIDTH: f32 = 1.0;
const DEFAULT_LINE_SCALE: f32 = 1.0;
const DEFAULT_LIGHT_SABER_FACTOR: f32 = 0.9;

static NEXT_MATERIAL_ID: AtomicU64 = AtomicU64::new(1);

/// A named float uniform
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProperty {
    pub name: String,
    pub value: f32,
}

/// Authored material shared between line instances
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub color: Vec4,
    pub properties: Vec<MaterialProperty>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            color: Vec4::ONE,
            properties: Vec::new(),
        }
    }
}

impl Material {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Declare a float uniform, replacing any previous value.
    pub fn with_float(mut self, name: &str, value: f32) -> Self {
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.properties.push(MaterialProperty {
                name: name.to_string(),
                value,
            }),
        }
        self
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Check that this material can drive the line shader.
    pub fn validate_line_template(&self) -> LineResult<()> {
        if self.get_float(LINE_WIDTH).is_none() {
            return Err(LineError::MissingUniform(LINE_WIDTH.to_string()));
        }
        Ok(())
    }

    // Preset materials

    /// White beam with the default width and core factor.
    pub fn volumetric_line() -> Self {
        Self::new("volumetric_line")
            .with_color(Vec4::ONE)
            .with_float(LINE_WIDTH, DEFAULT_LINE_WIDTH)
            .with_float(LIGHT_SABER_FACTOR, DEFAULT_LIGHT_SABER_FACTOR)
    }
}

/// Process-unique identity of a material instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u64);

impl MaterialId {
    fn next() -> Self {
        Self(NEXT_MATERIAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Independently mutable copy of a template material
#[derive(Debug, Clone)]
pub struct MaterialInstance {
    id: MaterialId,
    template: Arc<Material>,
    name: String,
    color: Vec4,
    properties: Vec<MaterialProperty>,
    revision: u64,
}

impl MaterialInstance {
    /// Duplicate a template. The template itself is never written.
    pub fn from_template(template: &Arc<Material>) -> Self {
        Self {
            id: MaterialId::next(),
            template: Arc::clone(template),
            name: format!("{} (instance)", template.name),
            color: template.color,
            properties: template.properties.clone(),
            revision: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> MaterialId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &Arc<Material> {
        &self.template
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
        self.revision += 1;
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Write a float uniform, adding it if the template did not declare it.
    pub fn set_float(&mut self, name: &str, value: f32) {
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.properties.push(MaterialProperty {
                name: name.to_string(),
                value,
            }),
        }
        self.revision += 1;
    }

    /// Incremented on every uniform write
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Create a uniform data struct for GPU
    pub fn uniform_data(&self) -> LineUniformData {
        LineUniformData {
            color: self.color,
            line_width: self.get_float(LINE_WIDTH).unwrap_or(DEFAULT_LINE_WIDTH),
            line_scale: self.get_float(LINE_SCALE).unwrap_or(DEFAULT_LINE_SCALE),
            light_saber_factor: self
                .get_float(LIGHT_SABER_FACTOR)
                .unwrap_or(DEFAULT_LIGHT_SABER_FACTOR),
            _padding: 0.0,
        }
    }
}

/// Line material uniform data for GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LineUniformData {
    pub color: Vec4,
    pub line_width: f32,
    pub line_scale: f32,
    pub light_saber_factor: f32,
    pub _padding: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumetric_line_preset() {
        let mat = Material::volumetric_line();
        assert_eq!(mat.get_float(LINE_WIDTH), Some(1.0));
        assert_eq!(mat.get_float(LIGHT_SABER_FACTOR), Some(0.9));
        assert!(mat.get_float(LINE_SCALE).is_none());
        assert!(mat.validate_line_template().is_ok());
    }

    #[test]
    fn test_template_without_width_rejected() {
        let mat = Material::new("plain").with_color(Vec4::X);
        assert_eq!(
            mat.validate_line_template(),
            Err(LineError::MissingUniform(LINE_WIDTH.to_string()))
        );
    }

    #[test]
    fn test_instance_does_not_touch_template() {
        let template = Arc::new(Material::volumetric_line().with_color(Vec4::new(0.0, 0.0, 1.0, 1.0)));
        let mut instance = MaterialInstance::from_template(&template);
        assert_eq!(instance.color(), template.color);

        instance.set_color(Vec4::new(1.0, 0.0, 0.0, 1.0));
        instance.set_float(LINE_WIDTH, 4.0);
        instance.set_float(LINE_SCALE, 2.0);

        assert_eq!(template.color, Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(template.get_float(LINE_WIDTH), Some(1.0));
        assert!(template.get_float(LINE_SCALE).is_none());
        assert_eq!(instance.get_float(LINE_SCALE), Some(2.0));
        assert_eq!(instance.revision(), 3);
        assert!(Arc::ptr_eq(instance.template(), &template));
    }

    #[test]
    fn test_instances_have_distinct_ids() {
        let template = Arc::new(Material::volumetric_line());
        let a = MaterialInstance::from_template(&template);
        let b = MaterialInstance::from_template(&template);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), "volumetric_line (instance)");
    }

    #[test]
    fn test_uniform_data() {
        let template = Arc::new(Material::volumetric_line());
        let mut instance = MaterialInstance::from_template(&template);
        instance.set_float(LINE_SCALE, 3.0);

        let data = instance.uniform_data();
        assert_eq!(data.color, Vec4::ONE);
        assert_eq!(data.line_width, 1.0);
        assert_eq!(data.line_scale, 3.0);
        assert_eq!(data.light_saber_factor, 0.9);
        assert_eq!(bytemuck::bytes_of(&data).len(), 32);
    }
}
