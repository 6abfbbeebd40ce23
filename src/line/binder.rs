//! Volumetric line component

use std::sync::Arc;

use bevy_ecs::prelude::*;
use glam::{Mat4, Vec3, Vec4};

use crate::config::{VolumetricLineConfig, WidthPolicy};
use crate::debug::{DebugDrawerContext, GIZMO_COLOR};
use crate::error::LineResult;
use crate::resources::{
    LineMesh, Material, MaterialInstance, LIGHT_SABER_FACTOR, LINE_SCALE, LINE_WIDTH,
};
use crate::scene::line_width_scale;

/// Lifecycle of a [`VolumetricLine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Inactive,
    Active,
}

/// Fields an editor may change without going through the setters.
///
/// After editing them through [`VolumetricLine::properties_mut`], call
/// [`VolumetricLine::notify_properties_edited`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineProperties {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Vec4,
    pub width: f32,
    pub light_saber_factor: f32,
}

/// A single volumetric line bound to its own mesh and material.
///
/// The embedding application drives it: [`activate`](Self::activate) once,
/// [`tick`](Self::tick) every frame, [`teardown`](Self::teardown) at the end.
/// Nothing here fails. Operations that need the mesh or the material are
/// skipped while that resource is absent.
#[derive(Component, Debug)]
pub struct VolumetricLine {
    properties: LineProperties,
    preserve_template_properties: bool,
    width_policy: WidthPolicy,
    label: String,
    template: Option<Arc<Material>>,
    material: Option<MaterialInstance>,
    mesh: Option<LineMesh>,
    state: LineState,
}

impl Default for VolumetricLine {
    fn default() -> Self {
        Self::new(VolumetricLineConfig::default())
    }
}

impl VolumetricLine {
    /// Create an inactive line without a template material.
    pub fn new(config: VolumetricLineConfig) -> Self {
        Self {
            properties: LineProperties {
                start: config.start,
                end: config.end,
                color: config.color,
                width: config.width,
                light_saber_factor: config.light_saber_factor,
            },
            preserve_template_properties: config.preserve_template_properties,
            width_policy: config.width_policy,
            label: config
                .label
                .unwrap_or_else(|| "volumetric_line".to_string()),
            template: None,
            material: None,
            mesh: None,
            state: LineState::Inactive,
        }
    }

    /// Validate the config and template, then create an inactive line.
    pub fn from_config(
        config: VolumetricLineConfig,
        template: Option<Arc<Material>>,
    ) -> LineResult<Self> {
        config.validate()?;
        let line = Self::new(config);
        match template {
            Some(template) => line.with_template(template),
            None => Ok(line),
        }
    }

    /// Attach the template duplicated on activation.
    pub fn with_template(mut self, template: Arc<Material>) -> LineResult<Self> {
        template.validate_line_template()?;
        self.template = Some(template);
        Ok(self)
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LineState::Active
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn preserves_template_properties(&self) -> bool {
        self.preserve_template_properties
    }

    pub fn template(&self) -> Option<&Arc<Material>> {
        self.template.as_ref()
    }

    /// Owned material instance, present between activation and teardown
    pub fn material(&self) -> Option<&MaterialInstance> {
        self.material.as_ref()
    }

    /// Bound geometry buffer, present once activated
    pub fn mesh(&self) -> Option<&LineMesh> {
        self.mesh.as_ref()
    }

    /// Mesh and material pair ready to be drawn.
    pub fn renderable(&self) -> Option<(&LineMesh, &MaterialInstance)> {
        Some((self.mesh.as_ref()?, self.material.as_ref()?))
    }

    /// Bind the mesh and, on first activation, duplicate the template.
    ///
    /// `world` is the object-to-world matrix of the owning entity.
    pub fn activate(&mut self, world: &Mat4) {
        let LineProperties { start, end, .. } = self.properties;
        match self.mesh.as_mut() {
            Some(mesh) => mesh.set_endpoints(start, end),
            None => self.mesh = Some(LineMesh::new(&self.label, start, end)),
        }

        if self.material.is_none() {
            let instance = self.template.as_ref().map(|template| {
                MaterialInstance::from_template(template)
                    .with_name(format!("{} material", self.label))
            });
            if let Some(instance) = instance {
                log::debug!(
                    "Volumetric line '{}' created material {:?}",
                    self.label,
                    instance.id()
                );
                self.material = Some(instance);
                self.sync_properties(world);
            }
        }

        self.state = LineState::Active;
    }

    /// Push every field onto the mesh and material.
    ///
    /// Color, width and light saber factor are skipped when the template's
    /// values are preserved; the scale is always refreshed.
    pub fn sync_properties(&mut self, world: &Mat4) {
        let LineProperties { start, end, .. } = self.properties;
        self.set_endpoints(start, end);

        if let Some(material) = self.material.as_mut() {
            if !self.preserve_template_properties {
                material.set_color(self.properties.color);
                material.set_float(LINE_WIDTH, self.width_policy.apply(self.properties.width));
                material.set_float(LIGHT_SABER_FACTOR, self.properties.light_saber_factor);
            }
            material.set_float(LINE_SCALE, line_width_scale(world));
        }
    }

    /// Rewrite the bound mesh with the given endpoints.
    ///
    /// Only the geometry buffer changes; the stored start and end are left
    /// alone. Does nothing before activation.
    pub fn set_endpoints(&mut self, start: Vec3, end: Vec3) {
        if let Some(mesh) = self.mesh.as_mut() {
            mesh.set_endpoints(start, end);
        }
    }

    /// Per-frame check.
    ///
    /// Refreshes `_LineScale` only when the caller reports that the owning
    /// transform changed since the previous tick.
    pub fn tick(&mut self, world: &Mat4, transform_changed: bool) {
        if !transform_changed {
            return;
        }
        if let Some(material) = self.material.as_mut() {
            let scale = line_width_scale(world);
            log::trace!("Volumetric line '{}' scale -> {}", self.label, scale);
            material.set_float(LINE_SCALE, scale);
        }
    }

    /// Release the material. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(material) = self.material.take() {
            log::debug!(
                "Volumetric line '{}' released material {:?}",
                self.label,
                material.id()
            );
        }
        self.state = LineState::Inactive;
    }

    pub fn properties(&self) -> &LineProperties {
        &self.properties
    }

    /// Direct access for editors; follow with [`notify_properties_edited`](Self::notify_properties_edited).
    pub fn properties_mut(&mut self) -> &mut LineProperties {
        &mut self.properties
    }

    /// Resynchronize after fields were edited out-of-band.
    pub fn notify_properties_edited(&mut self, world: &Mat4) {
        self.sync_properties(world);
    }

    pub fn start(&self) -> Vec3 {
        self.properties.start
    }

    pub fn set_start(&mut self, start: Vec3) {
        self.properties.start = start;
        self.set_endpoints(start, self.properties.end);
    }

    pub fn end(&self) -> Vec3 {
        self.properties.end
    }

    pub fn set_end(&mut self, end: Vec3) {
        self.properties.end = end;
        self.set_endpoints(self.properties.start, end);
    }

    pub fn color(&self) -> Vec4 {
        self.properties.color
    }

    /// Set the color and write it to the material, whatever the preserve flag says.
    pub fn set_color(&mut self, color: Vec4) {
        self.properties.color = color;
        if let Some(material) = self.material.as_mut() {
            material.set_color(color);
        }
    }

    pub fn width(&self) -> f32 {
        self.properties.width
    }

    /// Set the width and write it to the material, whatever the preserve flag says.
    pub fn set_width(&mut self, width: f32) {
        self.properties.width = width;
        if let Some(material) = self.material.as_mut() {
            material.set_float(LINE_WIDTH, self.width_policy.apply(width));
        }
    }

    pub fn light_saber_factor(&self) -> f32 {
        self.properties.light_saber_factor
    }

    pub fn set_light_saber_factor(&mut self, factor: f32) {
        self.properties.light_saber_factor = factor;
        if let Some(material) = self.material.as_mut() {
            material.set_float(LIGHT_SABER_FACTOR, factor);
        }
    }

    /// Queue a green world-space line from start to end.
    pub fn draw_gizmo(&self, world: &Mat4, ctx: &mut DebugDrawerContext<'_>) {
        ctx.draw_line(
            world.transform_point3(self.properties.start),
            world.transform_point3(self.properties.end),
            GIZMO_COLOR,
        );
    }
}

impl Drop for VolumetricLine {
    fn drop(&mut self) {
        self.teardown();
    }
}
