//! Sticky per-draw shader state
//!
//! Mirrors the "set uniforms, then draw" style of immediate-mode renderers:
//! each setter changes one value, and every value stays in effect for all
//! following draws until it is set again.

use std::collections::HashSet;

use cgmath::{Matrix4, SquareMatrix, Vector3};

use super::draw_list::{CylinderParts, DrawCommand, MaterialValues, MeshKind};
use super::transform::compose_model_matrix;
use crate::gfx::resources::material::ObjectMaterial;

#[derive(Debug, Clone)]
pub struct ShaderState {
    model: Matrix4<f32>,
    color: [f32; 4],
    use_texture: bool,
    texture_slot: Option<usize>,
    uv_scale: [f32; 2],
    material: MaterialValues,
    use_lighting: bool,
    warned_textures: HashSet<String>,
    warned_materials: HashSet<String>,
}

impl Default for ShaderState {
    fn default() -> Self {
        Self {
            model: Matrix4::identity(),
            color: [1.0, 1.0, 1.0, 1.0],
            use_texture: false,
            texture_slot: None,
            uv_scale: [1.0, 1.0],
            material: MaterialValues::default(),
            use_lighting: false,
            warned_textures: HashSet::new(),
            warned_materials: HashSet::new(),
        }
    }
}

impl ShaderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the initial values; the once-per-tag warning memory is kept
    pub fn reset(&mut self) {
        let warned_textures = std::mem::take(&mut self.warned_textures);
        let warned_materials = std::mem::take(&mut self.warned_materials);
        *self = Self {
            warned_textures,
            warned_materials,
            ..Self::default()
        };
    }

    /// Sets the model matrix from scale, XYZ rotations in degrees and position
    pub fn set_transformations(
        &mut self,
        scale: [f32; 3],
        x_rotation_degrees: f32,
        y_rotation_degrees: f32,
        z_rotation_degrees: f32,
        position: [f32; 3],
    ) {
        self.model = compose_model_matrix(
            Vector3::from(scale),
            x_rotation_degrees,
            y_rotation_degrees,
            z_rotation_degrees,
            Vector3::from(position),
        );
    }

    /// Sets the object colour and turns texturing off
    pub fn set_shader_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.use_texture = false;
        self.color = [r, g, b, a];
    }

    /// Turns texturing on with the texture in `slot`
    ///
    /// `slot` is the registry lookup result for `tag`. On a miss texturing
    /// stays off, so the draw falls back to the object colour, and the miss
    /// is logged once per tag.
    pub fn set_shader_texture(&mut self, tag: &str, slot: Option<usize>) {
        match slot {
            Some(slot) => {
                self.use_texture = true;
                self.texture_slot = Some(slot);
            }
            None => {
                self.use_texture = false;
                self.texture_slot = None;
                if self.warned_textures.insert(tag.to_string()) {
                    log::warn!("No texture registered for tag '{}', drawing untextured", tag);
                }
            }
        }
    }

    pub fn set_texture_uv_scale(&mut self, u: f32, v: f32) {
        self.uv_scale = [u, v];
    }

    /// Copies the values of `material`, the registry lookup result for `tag`
    ///
    /// On a miss the previous material stays in effect.
    pub fn set_shader_material(&mut self, tag: &str, material: Option<&ObjectMaterial>) {
        match material {
            Some(material) => {
                self.material = MaterialValues {
                    diffuse_color: material.diffuse_color,
                    specular_color: material.specular_color,
                    shininess: material.shininess,
                };
            }
            None => {
                if self.warned_materials.insert(tag.to_string()) {
                    log::warn!("No material defined for tag '{}', keeping the previous one", tag);
                }
            }
        }
    }

    pub fn set_use_lighting(&mut self, use_lighting: bool) {
        self.use_lighting = use_lighting;
    }

    /// Freezes the current state into a draw of `mesh`
    pub fn snapshot(&self, mesh: MeshKind) -> DrawCommand {
        DrawCommand {
            model: self.model,
            color: self.color,
            texture_slot: if self.use_texture {
                self.texture_slot
            } else {
                None
            },
            uv_scale: self.uv_scale,
            material: self.material,
            use_lighting: self.use_lighting,
            mesh,
            parts: CylinderParts::ALL,
        }
    }

    pub fn model(&self) -> Matrix4<f32> {
        self.model
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn material(&self) -> MaterialValues {
        self.material
    }

    pub fn use_lighting(&self) -> bool {
        self.use_lighting
    }

    /// Texture slot the next draw samples, if texturing is on
    pub fn active_texture(&self) -> Option<usize> {
        self.texture_slot.filter(|_| self.use_texture)
    }

    /// Tags that missed during texture or material selection
    pub fn missed_tags(&self) -> impl Iterator<Item = &str> {
        self.warned_textures
            .iter()
            .chain(self.warned_materials.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::material::presets;

    #[test]
    fn test_color_disables_texture() {
        let mut state = ShaderState::new();
        state.set_shader_texture("wood", Some(3));
        assert_eq!(state.active_texture(), Some(3));

        state.set_shader_color(1.0, 0.0, 0.0, 1.0);
        let command = state.snapshot(MeshKind::Box);
        assert_eq!(command.texture_slot, None);
        assert_eq!(command.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_texture_reenables_after_color() {
        let mut state = ShaderState::new();
        state.set_shader_color(0.5, 0.5, 0.5, 1.0);
        state.set_shader_texture("book", Some(11));
        assert_eq!(state.snapshot(MeshKind::Box).texture_slot, Some(11));
    }

    #[test]
    fn test_texture_miss_draws_with_color() {
        let mut state = ShaderState::new();
        state.set_shader_texture("silverBase", Some(0));
        state.set_shader_texture("drywall", None);

        let command = state.snapshot(MeshKind::Box);
        assert!(!command.is_textured());
        assert_eq!(command.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(state.missed_tags().collect::<Vec<_>>(), vec!["drywall"]);
    }

    #[test]
    fn test_material_miss_keeps_previous() {
        let mut state = ShaderState::new();
        let glass = presets::glass();
        state.set_shader_material("glass", Some(&glass));
        state.set_shader_material("rubber", None);

        let material = state.snapshot(MeshKind::Sphere).material;
        assert_eq!(material.shininess, 95.0);
        assert_eq!(material.specular_color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_state_is_sticky_between_draws() {
        let mut state = ShaderState::new();
        state.set_transformations([2.0, 2.0, 2.0], 0.0, 0.0, 0.0, [1.0, 2.0, 3.0]);
        state.set_texture_uv_scale(2.0, 0.5);
        state.set_use_lighting(true);

        let first = state.snapshot(MeshKind::Box);
        let second = state.snapshot(MeshKind::Plane);
        assert_eq!(first.model, second.model);
        assert_eq!(second.uv_scale, [2.0, 0.5]);
        assert!(second.use_lighting);
        assert_eq!(second.position(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_reset_keeps_warning_memory() {
        let mut state = ShaderState::new();
        state.set_shader_texture("drywall", None);
        state.set_shader_color(0.0, 0.0, 0.0, 1.0);
        state.reset();

        assert_eq!(state.color(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(state.model(), Matrix4::identity());
        assert_eq!(state.missed_tags().count(), 1);
    }
}
