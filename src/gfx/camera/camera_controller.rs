use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::{OrbitCamera, ProjectionMode};

pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        if self.apply_device_event(event, camera) {
            window.request_redraw();
        }
    }

    /// Applies a raw device event; returns true when the camera moved
    fn apply_device_event(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                if self.is_shift_held {
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                } else {
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.apply_key(code, event.state, camera);
        }
    }

    fn apply_key(&mut self, code: KeyCode, state: ElementState, camera: &mut OrbitCamera) {
        match (code, state) {
            (KeyCode::ShiftLeft | KeyCode::ShiftRight, state) => {
                self.is_shift_held = state == ElementState::Pressed;
            }
            (KeyCode::KeyP, ElementState::Pressed) => {
                camera.set_projection(ProjectionMode::Perspective);
            }
            (KeyCode::KeyO, ElementState::Pressed) => {
                camera.set_projection(ProjectionMode::Orthographic);
            }
            (KeyCode::KeyC, ElementState::Pressed) if self.is_shift_held => {
                log::info!("Resetting camera to default position");
                camera.reset_to_default();
            }
            _ => (),
        }
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_shift_held
    }

    /// Adjust panning sensitivity
    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::orbit_camera::DEFAULT_TARGET;

    fn press(button: u32) -> DeviceEvent {
        DeviceEvent::Button {
            button,
            state: ElementState::Pressed,
        }
    }

    #[test]
    fn test_drag_rotates_and_shift_drag_pans() {
        let mut controller = CameraController::new(0.01, 1.0);
        let mut camera = OrbitCamera::desk_view(1.0);
        let motion = DeviceEvent::MouseMotion { delta: (10.0, 5.0) };

        // Motion without a pressed button does nothing
        assert!(!controller.apply_device_event(&motion, &mut camera));

        controller.apply_device_event(&press(0), &mut camera);
        assert!(controller.is_rotating());
        let yaw = camera.yaw;
        assert!(controller.apply_device_event(&motion, &mut camera));
        assert!(camera.yaw < yaw);
        assert_eq!(camera.target, DEFAULT_TARGET);

        controller.apply_key(KeyCode::ShiftLeft, ElementState::Pressed, &mut camera);
        assert!(controller.is_panning());
        controller.apply_device_event(&motion, &mut camera);
        assert_ne!(camera.target, DEFAULT_TARGET);
    }

    #[test]
    fn test_wheel_zooms() {
        let mut controller = CameraController::new(0.01, 1.0);
        let mut camera = OrbitCamera::desk_view(1.0);
        let distance = camera.distance;
        let scroll_in = DeviceEvent::MouseWheel {
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
        };
        assert!(controller.apply_device_event(&scroll_in, &mut camera));
        assert!(camera.distance < distance);
    }

    #[test]
    fn test_projection_keys() {
        let mut controller = CameraController::new(0.01, 1.0);
        let mut camera = OrbitCamera::desk_view(1.0);

        controller.apply_key(KeyCode::KeyO, ElementState::Pressed, &mut camera);
        assert_eq!(camera.projection, ProjectionMode::Orthographic);
        controller.apply_key(KeyCode::KeyP, ElementState::Pressed, &mut camera);
        assert_eq!(camera.projection, ProjectionMode::Perspective);
    }

    #[test]
    fn test_reset_needs_shift() {
        let mut controller = CameraController::new(0.01, 1.0);
        let mut camera = OrbitCamera::desk_view(1.0);
        camera.pan((3.0, 0.0));

        controller.apply_key(KeyCode::KeyC, ElementState::Pressed, &mut camera);
        assert_ne!(camera.target, DEFAULT_TARGET);

        controller.apply_key(KeyCode::ShiftRight, ElementState::Pressed, &mut camera);
        controller.apply_key(KeyCode::KeyC, ElementState::Pressed, &mut camera);
        assert_eq!(camera.target, DEFAULT_TARGET);
    }
}
