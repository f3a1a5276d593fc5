//! GPU meshes for the primitive shapes
//!
//! [`MeshLibrary`] keeps one uploaded mesh per [`MeshKind`]. Only loaded kinds
//! can be drawn; the render engine skips draws of anything else.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::gfx::geometry::{self, GeometryData, IndexRange, MeshPart};
use crate::scene::draw_list::{CylinderParts, MeshKind};

/// Builds the CPU geometry for `kind`
pub fn geometry_for(kind: MeshKind) -> GeometryData {
    match kind {
        MeshKind::Plane => geometry::generate_unit_plane(),
        MeshKind::Box => geometry::generate_cube(),
        MeshKind::Cylinder => geometry::generate_cylinder(geometry::DEFAULT_SEGMENTS),
        MeshKind::Sphere => geometry::generate_sphere(geometry::DEFAULT_SEGMENTS, 18),
        MeshKind::HalfSphere => geometry::generate_half_sphere(geometry::DEFAULT_SEGMENTS, 9),
        MeshKind::Cone => geometry::generate_cone(geometry::DEFAULT_SEGMENTS),
        MeshKind::TaperedCylinder => {
            geometry::generate_tapered_cylinder(geometry::DEFAULT_SEGMENTS)
        }
        MeshKind::Pyramid4 => geometry::generate_pyramid4(),
    }
}

/// Index ranges to draw for `parts`
///
/// Meshes without named parts, and requests for every part, draw the whole
/// index buffer in one call.
pub fn index_ranges(parts: CylinderParts, ranges: &[IndexRange], index_count: u32) -> Vec<Range<u32>> {
    if ranges.is_empty() || parts.is_all() {
        return vec![0..index_count];
    }

    ranges
        .iter()
        .filter(|range| match range.part {
            MeshPart::Top => parts.top,
            MeshPart::Bottom => parts.bottom,
            MeshPart::Sides => parts.sides,
        })
        .map(|range| range.start..range.start + range.count)
        .collect()
}

/// Uploaded vertex and index buffers of one primitive
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    parts: Vec<IndexRange>,
}

impl GpuMesh {
    pub fn from_geometry(device: &wgpu::Device, geometry: &GeometryData, label: &str) -> Self {
        let vertices = geometry.to_vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
            parts: geometry.parts.clone(),
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn ranges_for(&self, parts: CylinderParts) -> Vec<Range<u32>> {
        index_ranges(parts, &self.parts, self.index_count)
    }
}

/// One GPU mesh per loaded [`MeshKind`]
#[derive(Default)]
pub struct MeshLibrary {
    meshes: HashMap<MeshKind, GpuMesh>,
    warned: HashSet<MeshKind>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads the mesh for `kind`; loading a kind twice keeps the first upload
    pub fn load(&mut self, device: &wgpu::Device, kind: MeshKind) {
        if self.meshes.contains_key(&kind) {
            return;
        }
        let geometry = geometry_for(kind);
        log::debug!(
            "Loading {} mesh: {} vertices, {} triangles",
            kind,
            geometry.vertex_count(),
            geometry.triangle_count()
        );
        self.meshes
            .insert(kind, GpuMesh::from_geometry(device, &geometry, kind.name()));
    }

    pub fn load_all(&mut self, device: &wgpu::Device, kinds: &[MeshKind]) {
        for &kind in kinds {
            self.load(device, kind);
        }
    }

    pub fn load_plane_mesh(&mut self, device: &wgpu::Device) {
        self.load(device, MeshKind::Plane);
    }

    pub fn load_box_mesh(&mut self, device: &wgpu::Device) {
        self.load(device, MeshKind::Box);
    }

    pub fn load_cylinder_mesh(&mut self, device: &wgpu::Device) {
        self.load(device, MeshKind::Cylinder);
    }

    pub fn load_sphere_mesh(&mut self, device: &wgpu::Device) {
        self.load(device, MeshKind::Sphere);
    }

    pub fn load_half_sphere_mesh(&mut self, device: &wgpu::Device) {
        self.load(device, MeshKind::HalfSphere);
    }

    pub fn load_cone_mesh(&mut self, device: &wgpu::Device) {
        self.load(device, MeshKind::Cone);
    }

    pub fn load_tapered_cylinder_mesh(&mut self, device: &wgpu::Device) {
        self.load(device, MeshKind::TaperedCylinder);
    }

    pub fn load_pyramid4_mesh(&mut self, device: &wgpu::Device) {
        self.load(device, MeshKind::Pyramid4);
    }

    pub fn is_loaded(&self, kind: MeshKind) -> bool {
        self.meshes.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// The mesh for `kind`, warning once per kind when it was never loaded
    pub fn get_or_warn(&mut self, kind: MeshKind) -> Option<&GpuMesh> {
        if !self.meshes.contains_key(&kind) {
            if self.warned.insert(kind) {
                log::warn!("The {} mesh is not loaded; its draws are skipped", kind);
            }
            return None;
        }
        self.meshes.get(&kind)
    }

    pub fn get(&self, kind: MeshKind) -> Option<&GpuMesh> {
        self.meshes.get(&kind)
    }
}

/// Render pass extension for drawing library meshes
pub trait DrawMesh {
    fn draw_mesh(&mut self, mesh: &GpuMesh);
    fn draw_mesh_parts(&mut self, mesh: &GpuMesh, parts: CylinderParts);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &GpuMesh) {
        self.draw_mesh_parts(mesh, CylinderParts::ALL);
    }

    fn draw_mesh_parts(&mut self, mesh: &GpuMesh, parts: CylinderParts) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for range in mesh.ranges_for(parts) {
            self.draw_indexed(range, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_geometry() {
        for kind in MeshKind::ALL {
            let geometry = geometry_for(kind);
            assert!(geometry.triangle_count() > 0, "{} is empty", kind);
        }
    }

    #[test]
    fn test_whole_mesh_without_parts() {
        let cube = geometry_for(MeshKind::Box);
        let ranges = index_ranges(
            CylinderParts::new(false, true, true),
            &cube.parts,
            cube.indices.len() as u32,
        );
        assert_eq!(ranges, vec![0..36]);
    }

    #[test]
    fn test_cylinder_without_top() {
        let cylinder = geometry_for(MeshKind::Cylinder);
        let total = cylinder.indices.len() as u32;
        let sides = cylinder.part(MeshPart::Sides).unwrap();
        let bottom = cylinder.part(MeshPart::Bottom).unwrap();

        let ranges = index_ranges(CylinderParts::new(false, true, true), &cylinder.parts, total);
        assert_eq!(
            ranges,
            vec![
                sides.start..sides.start + sides.count,
                bottom.start..bottom.start + bottom.count
            ]
        );

        let all = index_ranges(CylinderParts::ALL, &cylinder.parts, total);
        assert_eq!(all, vec![0..total]);
    }

    #[test]
    fn test_no_parts_selected() {
        let cylinder = geometry_for(MeshKind::Cylinder);
        let ranges = index_ranges(
            CylinderParts::new(false, false, false),
            &cylinder.parts,
            cylinder.indices.len() as u32,
        );
        assert!(ranges.is_empty());
    }
}
