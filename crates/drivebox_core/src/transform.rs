//! Transform (position, rotation, scale)
//!
//! A Transform represents the position, rotation, and scale of an entity.

use drivebox_math::{mat4, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A transform with position, rotation, and uniform scale
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a unit quaternion
    pub rotation: Quat,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: 1.0,
        }
    }

    /// Build the local-to-world model matrix (scale, then rotate, then translate)
    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        mat4::from_translation_rotation_scale(self.position, self.rotation, self.scale)
    }

    /// Transform a point from local space to world space
    ///
    /// Applies scale, then rotation, then translation.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let scaled = p * self.scale;
        let rotated = self.rotation.rotate(scaled);
        rotated + self.position
    }

    /// Transform a direction from local space to world space
    ///
    /// Applies scale and rotation, but not translation.
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        let scaled = d * self.scale;
        self.rotation.rotate(scaled)
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate the transform by a quaternion
    pub fn rotate(&mut self, q: Quat) {
        self.rotation = q.compose(&self.rotation).normalize();
    }

    /// Set uniform scale
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }
}
