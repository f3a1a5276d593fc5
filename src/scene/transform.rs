//! Model matrix composition
//!
//! Objects are placed with a scale, three Euler angles in degrees and a
//! translation. The rotations are applied about the world axes in X, Y, Z
//! order, after scaling and before translating.

use cgmath::{Deg, Matrix4, Vector3};

/// Builds `T * Rz * Ry * Rx * S`
pub fn compose_model_matrix(
    scale: Vector3<f32>,
    x_rotation_degrees: f32,
    y_rotation_degrees: f32,
    z_rotation_degrees: f32,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    let scale = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    let rotation_x = Matrix4::from_angle_x(Deg(x_rotation_degrees));
    let rotation_y = Matrix4::from_angle_y(Deg(y_rotation_degrees));
    let rotation_z = Matrix4::from_angle_z(Deg(z_rotation_degrees));
    let translation = Matrix4::from_translation(position);

    translation * rotation_z * rotation_y * rotation_x * scale
}

/// Scale, rotation in degrees and position of one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

impl Transform {
    pub fn new(scale: [f32; 3], rotation_degrees: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale: scale.into(),
            rotation_degrees: rotation_degrees.into(),
            position: position.into(),
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        compose_model_matrix(
            self.scale,
            self.rotation_degrees.x,
            self.rotation_degrees.y,
            self.rotation_degrees.z,
            self.position,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, SquareMatrix, Transform as _};

    fn assert_close(p: Point3<f32>, expected: [f32; 3]) {
        let actual = [p.x, p.y, p.z];
        for axis in 0..3 {
            assert!(
                (actual[axis] - expected[axis]).abs() < 1e-5,
                "{:?} != {:?}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_identity() {
        assert_eq!(Transform::default().matrix(), Matrix4::identity());
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        // Scale x by 2, rotate 90 degrees about Y, move up by 3
        let m = compose_model_matrix(
            Vector3::new(2.0, 1.0, 1.0),
            0.0,
            90.0,
            0.0,
            Vector3::new(0.0, 3.0, 0.0),
        );
        let p = m.transform_point(Point3::new(1.0, 0.0, 0.0));
        // (2, 0, 0) rotated +90 about Y lands on -Z
        assert_close(p, [0.0, 3.0, -2.0]);
    }

    #[test]
    fn test_x_rotation_applies_before_y() {
        let m = compose_model_matrix(
            Vector3::new(1.0, 1.0, 1.0),
            90.0,
            90.0,
            0.0,
            Vector3::new(0.0, 0.0, 0.0),
        );
        // +Y -> (Rx 90) +Z -> (Ry 90) +X
        let p = m.transform_point(Point3::new(0.0, 1.0, 0.0));
        assert_close(p, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_z_rotation_applies_last() {
        let m = compose_model_matrix(
            Vector3::new(1.0, 1.0, 1.0),
            0.0,
            90.0,
            90.0,
            Vector3::new(0.0, 0.0, 0.0),
        );
        // +X -> (Ry 90) -Z -> (Rz 90) -Z
        let p = m.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_close(p, [0.0, 0.0, -1.0]);
        // +Y -> (Ry 90) +Y -> (Rz 90) -X
        let q = m.transform_point(Point3::new(0.0, 1.0, 0.0));
        assert_close(q, [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transform_matches_free_function() {
        let t = Transform::new([40.0, 1.0, 20.0], [0.0, -45.0, 0.0], [0.0, -0.5, 0.0]);
        let m = compose_model_matrix(
            Vector3::new(40.0, 1.0, 20.0),
            0.0,
            -45.0,
            0.0,
            Vector3::new(0.0, -0.5, 0.0),
        );
        assert_eq!(t.matrix(), m);
    }
}
