use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

/// Maps OpenGL clip depth (-1..1) to wgpu's 0..1, leaving x, y and w alone
///
/// `Matrix4::new` is column-major: the 0.5 offset sits in the last column.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Framing of the desk when the camera is created or reset
pub const DEFAULT_DISTANCE: f32 = 22.0;
pub const DEFAULT_PITCH: f32 = 0.35;
pub const DEFAULT_YAW: f32 = 0.0;
pub const DEFAULT_TARGET: Vector3<f32> = Vector3::new(0.0, 3.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    pub fn name(self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "Perspective",
            ProjectionMode::Orthographic => "Orthographic",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub projection: ProjectionMode,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        OPENGL_TO_WGPU_MATRIX * self.projection_matrix() * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad::from(Deg(45.0)),
            znear: 0.1,
            zfar: 100.0,
            projection: ProjectionMode::Perspective,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Camera framing the whole desk
    pub fn desk_view(aspect: f32) -> Self {
        Self::new(DEFAULT_DISTANCE, DEFAULT_PITCH, DEFAULT_YAW, DEFAULT_TARGET, aspect)
    }

    /// Projection without the clip-space correction
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.projection {
            ProjectionMode::Perspective => perspective(self.fovy, self.aspect, self.znear, self.zfar),
            ProjectionMode::Orthographic => {
                // Same visible height at the target as the perspective view
                let half_height = self.distance * (self.fovy / 2.0).tan();
                let half_width = half_height * self.aspect;
                ortho(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.znear,
                    self.zfar,
                )
            }
        }
    }

    pub fn set_projection(&mut self, projection: ProjectionMode) {
        if self.projection != projection {
            log::info!("Camera projection: {}", projection.name());
        }
        self.projection = projection;
    }

    pub fn reset_to_default(&mut self) {
        self.distance = DEFAULT_DISTANCE;
        self.pitch = DEFAULT_PITCH;
        self.yaw = DEFAULT_YAW;
        self.target = DEFAULT_TARGET;
        self.projection = ProjectionMode::Perspective;

        self.update();
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.1)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale by distance for a consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;
        self.eye += movement;
        self.target += movement;
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(1.0),
            max_distance: Some(60.0),
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{} != {}", a, b);
    }

    #[test]
    fn test_eye_in_front_of_target() {
        let camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        assert_close(camera.eye.x, 0.0);
        assert_close(camera.eye.y, 0.0);
        assert_close(camera.eye.z, 10.0);
    }

    #[test]
    fn test_pitch_raises_eye() {
        let camera = OrbitCamera::desk_view(1.5);
        assert!(camera.eye.y > DEFAULT_TARGET.y);
        assert_close((camera.eye - camera.target).magnitude(), DEFAULT_DISTANCE);
    }

    #[test]
    fn test_distance_and_pitch_bounds() {
        let mut camera = OrbitCamera::desk_view(1.0);
        camera.set_distance(1000.0);
        assert_eq!(camera.distance, 60.0);
        camera.set_distance(0.0);
        assert_eq!(camera.distance, 1.0);

        camera.set_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_pan_moves_target_and_eye_together() {
        let mut camera = OrbitCamera::desk_view(1.0);
        let offset = camera.eye - camera.target;
        camera.pan((1.0, 0.5));
        assert_ne!(camera.target, DEFAULT_TARGET);
        let moved = camera.eye - camera.target;
        assert_close(moved.x, offset.x);
        assert_close(moved.y, offset.y);
        assert_close(moved.z, offset.z);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut camera = OrbitCamera::desk_view(1.0);
        camera.add_yaw(1.0);
        camera.pan((2.0, 2.0));
        camera.set_projection(ProjectionMode::Orthographic);
        camera.reset_to_default();

        assert_eq!(camera.target, DEFAULT_TARGET);
        assert_eq!(camera.yaw, DEFAULT_YAW);
        assert_eq!(camera.projection, ProjectionMode::Perspective);
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let mut camera = OrbitCamera::desk_view(16.0 / 9.0);
            camera.set_projection(mode);
            let clip = camera.build_view_projection_matrix() * DEFAULT_TARGET.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            assert_close(ndc.x, 0.0);
            assert_close(ndc.y, 0.0);
            assert!(ndc.z > 0.0 && ndc.z < 1.0, "{:?} depth {}", mode, ndc.z);
        }
    }

    #[test]
    fn test_clip_correction_only_remaps_depth() {
        let gl = Vector4::new(0.3, -0.7, -1.0, 1.0);
        let clip = OPENGL_TO_WGPU_MATRIX * gl;
        assert_close(clip.x, gl.x);
        assert_close(clip.y, gl.y);
        assert_close(clip.z, 0.0);
        assert_close(clip.w, gl.w);

        let far = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert_close(far.z, 1.0);
        assert_close(far.w, 1.0);
    }

    #[test]
    fn test_desk_points_inside_depth_range() {
        // Floor centre, keyboard and monitor
        let points = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.1, 0.25, 6.0),
            Vector3::new(0.0, 6.0, -4.0),
        ];

        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let mut camera = OrbitCamera::desk_view(16.0 / 9.0);
            camera.set_projection(mode);
            let view = Matrix4::look_at_rh(
                Point3::from_vec(camera.eye),
                Point3::from_vec(camera.target),
                camera.up,
            );
            let gl_only = camera.projection_matrix() * view;
            let wgpu = camera.build_view_projection_matrix();

            for point in points {
                let gl_clip = gl_only * point.extend(1.0);
                let clip = wgpu * point.extend(1.0);
                assert_close(clip.w, gl_clip.w);

                let ndc = clip.truncate() / clip.w;
                assert_close(ndc.x, gl_clip.x / gl_clip.w);
                assert_close(ndc.y, gl_clip.y / gl_clip.w);
                assert!(
                    ndc.z > 0.0 && ndc.z < 1.0,
                    "{:?} {:?} depth {}",
                    mode,
                    point,
                    ndc.z
                );
            }
        }
    }

    #[test]
    fn test_uniform_carries_eye() {
        let mut camera = OrbitCamera::desk_view(1.0);
        camera.update_view_proj();
        assert_eq!(
            camera.uniform.view_position,
            [camera.eye.x, camera.eye.y, camera.eye.z, 1.0]
        );
    }
}
