use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta},
};

use super::orbit_camera::OrbitCamera;
use crate::config::CameraConfig;

/// Orbit controls: left drag rotates, right drag pans, wheel zooms
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_rotating: bool,
    is_panning: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_rotating: false,
            is_panning: false,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut controller = Self::new(config.rotate_speed, config.zoom_speed);
        controller.set_pan_speed(config.pan_speed);
        controller
    }

    /// Tracks which drag mode is active
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.is_rotating = pressed,
            MouseButton::Right | MouseButton::Middle => self.is_panning = pressed,
            _ => (),
        }
    }

    pub fn release_buttons(&mut self) {
        self.is_rotating = false;
        self.is_panning = false;
    }

    /// Applies raw device motion to the camera
    ///
    /// Returns true if the camera moved.
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / 20.0
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_panning => {
                camera.pan((
                    -delta.0 as f32 * self.pan_speed,
                    delta.1 as f32 * self.pan_speed,
                ));
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_rotating => {
                camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                true
            }
            _ => false,
        }
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    pub fn is_rotating(&self) -> bool {
        self.is_rotating && !self.is_panning
    }

    /// Adjust panning sensitivity
    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), 1.0)
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut controller = CameraController::from_config(&CameraConfig::default());
        let mut camera = camera();
        let moved = controller.process_events(
            &DeviceEvent::MouseMotion {
                delta: (10.0, 5.0),
            },
            &mut camera,
        );
        assert!(!moved);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_left_drag_rotates() {
        let mut controller = CameraController::from_config(&CameraConfig::default());
        let mut camera = camera();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_rotating());

        controller.process_events(
            &DeviceEvent::MouseMotion {
                delta: (10.0, 0.0),
            },
            &mut camera,
        );
        assert!(camera.yaw < 0.0);

        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(!controller.is_rotating());
    }

    #[test]
    fn test_right_drag_pans() {
        let mut controller = CameraController::from_config(&CameraConfig::default());
        let mut camera = camera();
        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.process_events(
            &DeviceEvent::MouseMotion {
                delta: (0.0, 10.0),
            },
            &mut camera,
        );
        assert!(camera.target.y > 0.0);

        controller.release_buttons();
        assert!(!controller.is_panning());
    }

    #[test]
    fn test_wheel_zooms_in() {
        let mut controller = CameraController::from_config(&CameraConfig::default());
        let mut camera = camera();
        controller.process_events(
            &DeviceEvent::MouseWheel {
                delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            },
            &mut camera,
        );
        assert!(camera.distance < 3.0);
    }
}
