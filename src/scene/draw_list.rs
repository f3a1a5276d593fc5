//! Per-frame draw commands
//!
//! A [`DrawList`] is the output of composing one frame: every mesh draw in
//! submission order, each carrying a frozen copy of the shader state that
//! was current when it was issued.

use std::fmt;

use cgmath::Matrix4;

use super::shader_state::ShaderState;

/// Primitive meshes a scene can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    Plane,
    Box,
    Cylinder,
    Sphere,
    HalfSphere,
    Cone,
    TaperedCylinder,
    Pyramid4,
}

impl MeshKind {
    pub const ALL: [MeshKind; 8] = [
        MeshKind::Plane,
        MeshKind::Box,
        MeshKind::Cylinder,
        MeshKind::Sphere,
        MeshKind::HalfSphere,
        MeshKind::Cone,
        MeshKind::TaperedCylinder,
        MeshKind::Pyramid4,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MeshKind::Plane => "plane",
            MeshKind::Box => "box",
            MeshKind::Cylinder => "cylinder",
            MeshKind::Sphere => "sphere",
            MeshKind::HalfSphere => "half sphere",
            MeshKind::Cone => "cone",
            MeshKind::TaperedCylinder => "tapered cylinder",
            MeshKind::Pyramid4 => "pyramid",
        }
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which parts of a cylinder are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CylinderParts {
    pub top: bool,
    pub bottom: bool,
    pub sides: bool,
}

impl Default for CylinderParts {
    fn default() -> Self {
        Self::ALL
    }
}

impl CylinderParts {
    pub const ALL: CylinderParts = CylinderParts {
        top: true,
        bottom: true,
        sides: true,
    };

    pub fn new(top: bool, bottom: bool, sides: bool) -> Self {
        Self { top, bottom, sides }
    }

    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }
}

/// Material values copied into a draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialValues {
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl Default for MaterialValues {
    fn default() -> Self {
        Self {
            diffuse_color: [0.8, 0.8, 0.8],
            specular_color: [0.0, 0.0, 0.0],
            shininess: 1.0,
        }
    }
}

/// One mesh draw with the full state it is rendered with
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub model: Matrix4<f32>,
    pub color: [f32; 4],
    /// Slot in the texture registry; `None` draws with `color`
    pub texture_slot: Option<usize>,
    pub uv_scale: [f32; 2],
    pub material: MaterialValues,
    pub use_lighting: bool,
    pub mesh: MeshKind,
    /// Only meaningful for [`MeshKind::Cylinder`]
    pub parts: CylinderParts,
}

impl DrawCommand {
    pub fn is_textured(&self) -> bool {
        self.texture_slot.is_some()
    }

    /// World-space translation of the model matrix
    pub fn position(&self) -> [f32; 3] {
        [self.model.w.x, self.model.w.y, self.model.w.z]
    }
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn draw_plane_mesh(&mut self, state: &ShaderState) {
        self.push(state.snapshot(MeshKind::Plane));
    }

    pub fn draw_box_mesh(&mut self, state: &ShaderState) {
        self.push(state.snapshot(MeshKind::Box));
    }

    /// Draws the selected parts of the cylinder
    pub fn draw_cylinder_mesh(&mut self, state: &ShaderState, parts: CylinderParts) {
        let mut command = state.snapshot(MeshKind::Cylinder);
        command.parts = parts;
        self.push(command);
    }

    pub fn draw_sphere_mesh(&mut self, state: &ShaderState) {
        self.push(state.snapshot(MeshKind::Sphere));
    }

    pub fn draw_half_sphere_mesh(&mut self, state: &ShaderState) {
        self.push(state.snapshot(MeshKind::HalfSphere));
    }

    pub fn draw_cone_mesh(&mut self, state: &ShaderState) {
        self.push(state.snapshot(MeshKind::Cone));
    }

    pub fn draw_tapered_cylinder_mesh(&mut self, state: &ShaderState) {
        self.push(state.snapshot(MeshKind::TaperedCylinder));
    }

    pub fn draw_pyramid4_mesh(&mut self, state: &ShaderState) {
        self.push(state.snapshot(MeshKind::Pyramid4));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of draws of each mesh kind
    pub fn count_of(&self, mesh: MeshKind) -> usize {
        self.commands.iter().filter(|c| c.mesh == mesh).count()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_functions_record_mesh_kind() {
        let state = ShaderState::new();
        let mut list = DrawList::new();
        list.draw_plane_mesh(&state);
        list.draw_box_mesh(&state);
        list.draw_cylinder_mesh(&state, CylinderParts::new(false, true, true));
        list.draw_sphere_mesh(&state);
        list.draw_half_sphere_mesh(&state);
        list.draw_cone_mesh(&state);
        list.draw_tapered_cylinder_mesh(&state);
        list.draw_pyramid4_mesh(&state);

        let kinds: Vec<_> = list.iter().map(|c| c.mesh).collect();
        assert_eq!(kinds, MeshKind::ALL.to_vec());
        assert_eq!(list.len(), 8);
        assert!(!list.commands()[2].parts.top);
        assert!(list.commands()[0].parts.is_all());
    }

    #[test]
    fn test_count_and_clear() {
        let state = ShaderState::new();
        let mut list = DrawList::with_capacity(4);
        list.draw_box_mesh(&state);
        list.draw_box_mesh(&state);
        list.draw_cone_mesh(&state);

        assert_eq!(list.count_of(MeshKind::Box), 2);
        assert_eq!(list.count_of(MeshKind::Sphere), 0);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_mesh_kind_display() {
        assert_eq!(MeshKind::HalfSphere.to_string(), "half sphere");
        assert_eq!(format!("{}", MeshKind::Pyramid4), "pyramid");
    }
}
