//! Orbit camera
//!
//! The camera circles a target point at a fixed distance, controlled by
//! yaw and pitch angles. Mouse input reaches it through the
//! [`OrbitControl`] trait.

use drivebox_input::OrbitControl;
use drivebox_math::{mat4, Mat4, Vec3};

/// Camera that orbits around a target point
pub struct OrbitCamera {
    /// Point the camera looks at
    pub target: Vec3,
    /// Rotation around the Y axis in radians
    pub yaw: f32,
    /// Elevation angle in radians (positive looks down)
    pub pitch: f32,
    /// Distance from the target
    pub distance: f32,

    /// Zoom limits
    pub min_distance: f32,
    pub max_distance: f32,

    // Projection parameters
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Create a camera looking at the origin from a raised three-quarter view
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.6,
            pitch: 0.5,
            distance: 15.0,
            min_distance: 3.0,
            max_distance: 100.0,
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 500.0,
            aspect: 16.0 / 9.0,
        }
    }

    /// Builder: set the orbit target
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Builder: set the orbit distance
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self
    }

    /// Builder: set the vertical field of view in radians
    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Builder: set the near/far clip planes
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Update the aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// The camera position in world space
    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        Vec3::new(
            self.target.x + horizontal * self.yaw.sin(),
            self.target.y + self.distance * self.pitch.sin(),
            self.target.z + horizontal * self.yaw.cos(),
        )
    }

    /// The view matrix for the current orbit state
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.eye(), self.target, Vec3::Y)
    }

    /// The projection matrix for the current aspect ratio
    pub fn projection_matrix(&self) -> Mat4 {
        mat4::perspective(self.fov_y, self.aspect, self.near, self.far)
    }
}

impl OrbitControl for OrbitCamera {
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw -= delta_yaw;
        // Keep the camera above the ground plane and short of straight down
        self.pitch = (self.pitch + delta_pitch).clamp(0.05, 1.5);
    }

    fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(self.min_distance, self.max_distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_eye_at_distance_from_target() {
        let cam = OrbitCamera::new().with_target(Vec3::new(1.0, 2.0, 3.0));
        let offset = cam.eye() - cam.target;
        assert!((offset.length() - cam.distance).abs() < EPSILON);
    }

    #[test]
    fn test_zero_pitch_stays_level() {
        let mut cam = OrbitCamera::new();
        cam.pitch = 0.0;
        assert!((cam.eye().y - cam.target.y).abs() < EPSILON);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut cam = OrbitCamera::new();
        cam.orbit(0.0, 10.0);
        assert!(cam.pitch <= 1.5);
        cam.orbit(0.0, -20.0);
        assert!(cam.pitch >= 0.05);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let mut cam = OrbitCamera::new();
        cam.zoom(1000.0);
        assert_eq!(cam.distance, cam.max_distance);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, cam.min_distance);
    }

    #[test]
    fn test_view_matrix_centers_target() {
        let cam = OrbitCamera::new().with_target(Vec3::new(0.0, 1.0, 0.0));
        let view = cam.view_matrix();
        let in_view = mat4::transform_point(&view, cam.target);
        // The target sits on the view axis, straight ahead of the camera
        assert!(in_view.x.abs() < EPSILON);
        assert!(in_view.y.abs() < EPSILON);
        assert!((in_view.z + cam.distance).abs() < 0.001);
    }

    #[test]
    fn test_yaw_orbits_horizontally() {
        let mut cam = OrbitCamera::new();
        cam.pitch = 0.3;
        let before = cam.eye();
        cam.orbit(0.5, 0.0);
        let after = cam.eye();

        assert!((before.y - after.y).abs() < EPSILON, "yaw keeps height");
        assert!((before - after).length() > 0.01, "yaw moves the eye");
    }
}
