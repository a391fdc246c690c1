//! Orbit camera input
//!
//! Left-click drag orbits the camera around its target; the scroll wheel
//! zooms. Drag deltas are accumulated between frames and applied once per
//! frame with exponential smoothing, so the camera keeps coasting briefly
//! after the mouse stops.

use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Trait for orbit camera control
/// Allows the controller to work with different camera implementations
pub trait OrbitControl {
    /// Rotate around the target (radians)
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Move toward (negative) or away from (positive) the target
    fn zoom(&mut self, delta: f32);
}

/// Orbit camera controller for handling mouse input
pub struct OrbitController {
    // Mouse state
    dragging: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,

    // Smoothing state
    smooth_yaw: f32,
    smooth_pitch: f32,

    // Configuration
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    /// Exponential smoothing half-life in seconds
    pub smoothing_half_life: f32,
    pub smoothing_enabled: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            dragging: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,

            smooth_yaw: 0.0,
            smooth_pitch: 0.0,

            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.5,
            smoothing_half_life: 0.05,
            smoothing_enabled: true,
        }
    }

    /// Builder: set rotate sensitivity
    pub fn with_rotate_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotate_sensitivity = sensitivity;
        self
    }

    /// Builder: set zoom sensitivity
    pub fn with_zoom_sensitivity(mut self, sensitivity: f32) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    /// Builder: enable or disable smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Process mouse movement (only accumulates while dragging)
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        if self.dragging {
            self.pending_yaw += delta_x as f32;
            self.pending_pitch += delta_y as f32;
        }
    }

    /// Process scroll wheel input
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
        };
        // Scroll up zooms in
        self.pending_zoom -= amount;
    }

    /// Whether the user is currently dragging
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply the accumulated input to a camera
    pub fn update<C: OrbitControl>(&mut self, camera: &mut C, dt: f32) {
        let (yaw_input, pitch_input) = if self.smoothing_enabled && dt > 0.0 {
            // Exponential smoothing: new = old * factor + input * (1 - factor)
            // factor = 2^(-dt / half_life), so smaller half_life = faster response
            let smooth_factor = 2.0f32.powf(-dt / self.smoothing_half_life);
            self.smooth_yaw =
                self.smooth_yaw * smooth_factor + self.pending_yaw * (1.0 - smooth_factor);
            self.smooth_pitch =
                self.smooth_pitch * smooth_factor + self.pending_pitch * (1.0 - smooth_factor);
            (self.smooth_yaw, self.smooth_pitch)
        } else {
            (self.pending_yaw, self.pending_pitch)
        };

        if yaw_input != 0.0 || pitch_input != 0.0 {
            // Mouse right orbits right, mouse down tilts down
            camera.orbit(
                yaw_input * self.rotate_sensitivity,
                pitch_input * self.rotate_sensitivity,
            );
        }

        if self.pending_zoom != 0.0 {
            camera.zoom(self.pending_zoom * self.zoom_sensitivity);
        }

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_zoom = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCamera {
        yaw: f32,
        pitch: f32,
        zoom: f32,
    }

    impl OrbitControl for RecordingCamera {
        fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.yaw += delta_yaw;
            self.pitch += delta_pitch;
        }

        fn zoom(&mut self, delta: f32) {
            self.zoom += delta;
        }
    }

    #[test]
    fn test_motion_ignored_unless_dragging() {
        let mut controller = OrbitController::new().with_smoothing(false);
        let mut camera = RecordingCamera::default();

        controller.process_mouse_motion(10.0, 5.0);
        controller.update(&mut camera, 1.0 / 60.0);
        assert_eq!(camera.yaw, 0.0);

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(10.0, 5.0);
        controller.update(&mut camera, 1.0 / 60.0);
        assert!(camera.yaw > 0.0);
        assert!(camera.pitch > 0.0);
    }

    #[test]
    fn test_release_stops_drag() {
        let mut controller = OrbitController::new().with_smoothing(false);
        let mut camera = RecordingCamera::default();

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
        controller.process_mouse_motion(10.0, 0.0);
        controller.update(&mut camera, 1.0 / 60.0);

        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_pending_input_cleared_after_update() {
        let mut controller = OrbitController::new().with_smoothing(false);
        let mut camera = RecordingCamera::default();

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(10.0, 0.0);
        controller.update(&mut camera, 1.0 / 60.0);
        let after_first = camera.yaw;

        controller.update(&mut camera, 1.0 / 60.0);
        assert_eq!(camera.yaw, after_first, "no new input, no new rotation");
    }

    #[test]
    fn test_scroll_zooms() {
        let mut controller = OrbitController::new().with_smoothing(false);
        let mut camera = RecordingCamera::default();

        // Scroll up (positive line delta) zooms in
        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        controller.update(&mut camera, 1.0 / 60.0);
        assert!(camera.zoom < 0.0);
    }

    #[test]
    fn test_smoothing_spreads_input_over_frames() {
        let mut controller = OrbitController::new().with_smoothing(true);
        let mut camera = RecordingCamera::default();

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(100.0, 0.0);
        controller.update(&mut camera, 1.0 / 60.0);
        let first_frame = camera.yaw;

        // No new input, but the smoothed value keeps coasting
        controller.update(&mut camera, 1.0 / 60.0);
        assert!(camera.yaw > first_frame);
    }
}
