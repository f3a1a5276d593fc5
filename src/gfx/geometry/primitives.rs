//! # Primitive Shape Generation
//!
//! This module contains functions to generate the primitive shapes.
//! All shapes are generated with proper normals and texture coordinates.

use super::{GeometryData, MeshPart};
use std::f32::consts::PI;

/// Segment count used for the round primitives of the scene
pub const DEFAULT_SEGMENTS: u32 = 36;

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len <= f32::EPSILON {
        return [0.0, 1.0, 0.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Unit normal of the triangle (a, b, c) wound counter-clockwise
pub fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    normalize(cross(sub(b, a), sub(c, a)))
}

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has its own four vertices so normals stay flat, and UVs
/// span 0 to 1 per face.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    #[rustfmt::skip]
    let positions = [
        // Front (+Z)
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back (-Z)
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left (-X)
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right (+X)
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top (+Y)
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom (-Y)
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    #[rustfmt::skip]
    let tex_coords = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    for (face, normal) in face_normals.iter().enumerate() {
        let base = (face * 4) as u32;
        for corner in 0..4 {
            let i = face * 4 + corner;
            data.push_vertex(positions[i], *normal, tex_coords[i]);
        }
        data.push_triangle(base, base + 1, base + 2);
        data.push_triangle(base + 2, base + 3, base);
    }

    data
}

/// Generate a plane in the XZ plane facing +Y
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `width_segments` - Number of subdivisions along X
/// * `depth_segments` - Number of subdivisions along Z
///
/// V runs from the +Z edge (v = 0) to the -Z edge (v = 1), so a plane
/// rotated 90 degrees about X shows its texture upright.
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for j in 0..=d_segs {
        let v = j as f32 / d_segs as f32;
        let pos_z = (0.5 - v) * depth;

        for i in 0..=w_segs {
            let u = i as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;
            data.push_vertex([pos_x, 0.0, pos_z], [0.0, 1.0, 0.0], [u, v]);
        }
    }

    for j in 0..d_segs {
        for i in 0..w_segs {
            let p00 = j * (w_segs + 1) + i;
            let p10 = p00 + 1;
            let p01 = p00 + w_segs + 1;
            let p11 = p01 + 1;

            data.push_triangle(p00, p10, p11);
            data.push_triangle(p00, p11, p01);
        }
    }

    data
}

/// The scene's plane: 2 x 2, single quad
pub fn generate_unit_plane() -> GeometryData {
    generate_plane(2.0, 2.0, 1, 1)
}

/// Generate a capped frustum standing on the XZ plane, y from 0 to 1
///
/// A cylinder, a tapered cylinder and a cone are all frustums with
/// different top radii. Side, top and bottom index ranges are recorded so
/// the renderer can skip individual caps.
pub fn generate_frustum(
    bottom_radius: f32,
    top_radius: f32,
    segments: u32,
    top_cap: bool,
    bottom_cap: bool,
) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = segments.max(3);
    let slope = bottom_radius - top_radius;

    let ring = |i: u32| {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        (angle.sin(), angle.cos())
    };

    // Sides: interleaved bottom/top vertex pairs
    for i in 0..=segs {
        let (s, c) = ring(i);
        let u = i as f32 / segs as f32;
        let normal = normalize([s, slope, c]);

        data.push_vertex([bottom_radius * s, 0.0, bottom_radius * c], normal, [u, 0.0]);
        data.push_vertex([top_radius * s, 1.0, top_radius * c], normal, [u, 1.0]);
    }

    let start = data.indices.len() as u32;
    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let bottom_next = bottom + 2;
        let top_next = bottom + 3;

        data.push_triangle(bottom, bottom_next, top_next);
        if top_radius > 0.0 {
            data.push_triangle(bottom, top_next, top);
        }
    }
    data.close_part(MeshPart::Sides, start);

    if top_cap && top_radius > 0.0 {
        push_disc(&mut data, 1.0, top_radius, segs, true);
    }
    if bottom_cap && bottom_radius > 0.0 {
        push_disc(&mut data, 0.0, bottom_radius, segs, false);
    }

    data
}

/// Appends a flat disc at height `y` facing +Y (`up`) or -Y
fn push_disc(data: &mut GeometryData, y: f32, radius: f32, segs: u32, up: bool) {
    let normal = if up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center = data.push_vertex([0.0, y, 0.0], normal, [0.5, 0.5]);

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (s, c) = (angle.sin(), angle.cos());
        data.push_vertex([radius * s, y, radius * c], normal, [0.5 + 0.5 * s, 0.5 + 0.5 * c]);
    }

    let start = data.indices.len() as u32;
    for i in 0..segs {
        let current = center + 1 + i;
        let next = current + 1;
        if up {
            data.push_triangle(center, current, next);
        } else {
            data.push_triangle(center, next, current);
        }
    }
    data.close_part(if up { MeshPart::Top } else { MeshPart::Bottom }, start);
}

/// Cylinder of radius 1 from y = 0 to y = 1 with both caps
pub fn generate_cylinder(segments: u32) -> GeometryData {
    generate_frustum(1.0, 1.0, segments, true, true)
}

/// Cylinder narrowing from radius 1 at the bottom to 0.5 at the top
pub fn generate_tapered_cylinder(segments: u32) -> GeometryData {
    generate_frustum(1.0, 0.5, segments, true, true)
}

/// Cone with a closed base of radius 1 at y = 0 and its apex at y = 1
pub fn generate_cone(segments: u32) -> GeometryData {
    generate_frustum(1.0, 0.0, segments, false, true)
}

/// Latitude band of a unit sphere from the north pole down to `theta_max`
fn push_sphere_band(data: &mut GeometryData, long_segs: u32, lat_segs: u32, theta_max: f32) {
    let base = data.vertices.len() as u32;

    for lat in 0..=lat_segs {
        let theta = lat as f32 * theta_max / lat_segs as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            let u = long as f32 / long_segs as f32;
            let v = 1.0 - theta / PI;
            data.push_vertex([x, y, z], [x, y, z], [u, v]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = base + lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.push_triangle(first, first + 1, second);
            data.push_triangle(second, first + 1, second + 1);
        }
    }
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    push_sphere_band(&mut data, longitude_segments.max(3), latitude_segments.max(2), PI);
    data
}

/// Upper hemisphere of radius 1 with a closed disc at y = 0
pub fn generate_half_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let long_segs = longitude_segments.max(3);
    push_sphere_band(&mut data, long_segs, latitude_segments.max(1), PI / 2.0);

    // Base disc, ring matches the equator parameterisation
    let center = data.push_vertex([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.5, 0.5]);
    for long in 0..=long_segs {
        let phi = long as f32 * 2.0 * PI / long_segs as f32;
        let (x, z) = (phi.cos(), phi.sin());
        data.push_vertex([x, 0.0, z], [0.0, -1.0, 0.0], [0.5 + 0.5 * x, 0.5 + 0.5 * z]);
    }
    for long in 0..long_segs {
        let current = center + 1 + long;
        data.push_triangle(center, current, current + 1);
    }

    data
}

/// Four-sided pyramid: 1 x 1 base at y = -0.5, apex at (0, 0.5, 0)
pub fn generate_pyramid4() -> GeometryData {
    let mut data = GeometryData::new();

    let apex = [0.0, 0.5, 0.0];
    let front_left = [-0.5, -0.5, 0.5];
    let front_right = [0.5, -0.5, 0.5];
    let back_right = [0.5, -0.5, -0.5];
    let back_left = [-0.5, -0.5, -0.5];

    let sides = [
        (front_left, front_right),
        (front_right, back_right),
        (back_right, back_left),
        (back_left, front_left),
    ];

    for (a, b) in sides {
        let normal = face_normal(a, b, apex);
        let ia = data.push_vertex(a, normal, [0.0, 0.0]);
        let ib = data.push_vertex(b, normal, [1.0, 0.0]);
        let ic = data.push_vertex(apex, normal, [0.5, 1.0]);
        data.push_triangle(ia, ib, ic);
    }

    let down = [0.0, -1.0, 0.0];
    let fl = data.push_vertex(front_left, down, [0.0, 0.0]);
    let fr = data.push_vertex(front_right, down, [1.0, 0.0]);
    let br = data.push_vertex(back_right, down, [1.0, 1.0]);
    let bl = data.push_vertex(back_left, down, [0.0, 1.0]);
    data.push_triangle(fl, bl, br);
    data.push_triangle(fl, br, fr);

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Every non-degenerate triangle must face the same way as its vertex normals
    fn assert_outward(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| data.vertices[i as usize]);
            let area = cross(sub(b, a), sub(c, a));
            if dot(area, area) < 1e-10 {
                continue;
            }
            let n = data.normals[tri[0] as usize];
            assert!(
                dot(area, n) > 0.0,
                "triangle {:?} winds against its normal {:?}",
                tri,
                n
            );
        }
    }

    fn assert_indices_valid(data: &GeometryData) {
        assert_eq!(data.indices.len() % 3, 0);
        assert!(data.indices.iter().all(|&i| (i as usize) < data.vertex_count()));
        assert_eq!(data.vertices.len(), data.normals.len());
        assert_eq!(data.vertices.len(), data.tex_coords.len());
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.bounds(), ([-0.5; 3], [0.5; 3]));
        assert_indices_valid(&cube);
        assert_outward(&cube);
    }

    #[test]
    fn test_unit_plane() {
        let plane = generate_unit_plane();
        assert_eq!(plane.vertex_count(), 4);
        assert_eq!(plane.triangle_count(), 2);
        assert_eq!(plane.bounds(), ([-1.0, 0.0, -1.0], [1.0, 0.0, 1.0]));
        assert_outward(&plane);
    }

    #[test]
    fn test_plane_subdivision() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_indices_valid(&plane);
    }

    #[test]
    fn test_cylinder_parts_cover_all_indices() {
        let cylinder = generate_cylinder(16);
        let sides = cylinder.part(MeshPart::Sides).unwrap();
        let top = cylinder.part(MeshPart::Top).unwrap();
        let bottom = cylinder.part(MeshPart::Bottom).unwrap();

        assert_eq!(sides.count, 16 * 6);
        assert_eq!(top.count, 16 * 3);
        assert_eq!(bottom.count, 16 * 3);
        assert_eq!(sides.start, 0);
        assert_eq!(top.start, sides.count);
        assert_eq!(bottom.start, sides.count + top.count);
        assert_eq!(
            (sides.count + top.count + bottom.count) as usize,
            cylinder.indices.len()
        );

        let (min, max) = cylinder.bounds();
        assert!((min[1] - 0.0).abs() < 1e-6 && (max[1] - 1.0).abs() < 1e-6);
        assert!((max[0] - 1.0).abs() < 1e-5 && (min[2] + 1.0).abs() < 1e-5);
        assert_indices_valid(&cylinder);
        assert_outward(&cylinder);
    }

    #[test]
    fn test_tapered_cylinder_radii() {
        let tapered = generate_tapered_cylinder(24);
        for v in &tapered.vertices {
            let r = (v[0] * v[0] + v[2] * v[2]).sqrt();
            if v[1] == 1.0 {
                assert!(r <= 0.5 + 1e-5);
            } else {
                assert!(r <= 1.0 + 1e-5);
            }
        }
        assert!(tapered.part(MeshPart::Top).is_some());
        assert_outward(&tapered);
    }

    #[test]
    fn test_cone_has_base_only() {
        let cone = generate_cone(12);
        assert!(cone.part(MeshPart::Top).is_none());
        assert!(cone.part(MeshPart::Bottom).is_some());
        // Single triangle per segment on the sides
        assert_eq!(cone.part(MeshPart::Sides).unwrap().count, 12 * 3);
        assert!(cone
            .vertices
            .iter()
            .filter(|v| v[1] == 1.0)
            .all(|v| v[0].abs() < 1e-6 && v[2].abs() < 1e-6));
        assert_outward(&cone);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        for n in &sphere.normals {
            assert!((dot(*n, *n) - 1.0).abs() < 1e-5);
        }
        assert_indices_valid(&sphere);
        assert_outward(&sphere);
    }

    #[test]
    fn test_half_sphere_sits_on_base() {
        let half = generate_half_sphere(16, 8);
        let (min, max) = half.bounds();
        assert!(min[1].abs() < 1e-5);
        assert!((max[1] - 1.0).abs() < 1e-5);
        assert_indices_valid(&half);
        assert_outward(&half);
    }

    #[test]
    fn test_pyramid4() {
        let pyramid = generate_pyramid4();
        assert_eq!(pyramid.vertex_count(), 16);
        assert_eq!(pyramid.triangle_count(), 6);
        assert_eq!(pyramid.bounds(), ([-0.5; 3], [0.5; 3]));
        assert_outward(&pyramid);
    }

    #[test]
    fn test_face_normal() {
        let n = face_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, 1.0]);
    }
}
