//! Per-draw uniform data
//!
//! Every [`DrawCommand`] becomes one [`DrawUniform`] in a dynamic-offset
//! uniform buffer (bind group 1).

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::scene::draw_list::DrawCommand;

/// MUST match the `Draw` struct in the scene shader exactly
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for normals
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub use_lighting: u32,
    _padding: u32,
}
// Total: 64 + 64 + 16 + 16 + 16 + 16 = 192 bytes

/// Inverse transpose of `model`, identity when `model` is singular
pub fn normal_matrix(model: Matrix4<f32>) -> Matrix4<f32> {
    model
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix4::identity)
}

impl From<&DrawCommand> for DrawUniform {
    fn from(command: &DrawCommand) -> Self {
        Self {
            model: command.model.into(),
            normal_matrix: normal_matrix(command.model).into(),
            color: command.color,
            diffuse_color: command.material.diffuse_color,
            shininess: command.material.shininess,
            specular_color: command.material.specular_color,
            use_texture: command.texture_slot.is_some() as u32,
            uv_scale: command.uv_scale,
            use_lighting: command.use_lighting as u32,
            _padding: 0,
        }
    }
}
