//! 4x4 Matrix utilities
//!
//! Column-major matrices for model transforms, camera view, and projection.
//! The projection targets wgpu's clip space (depth range 0..1).

use crate::{Quat, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two matrices: result = a * b (b applied first)
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut m = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += a[k][row] * b[col][k];
            }
            m[col][row] = sum;
        }
    }
    m
}

/// Transform a point (w = 1) by a matrix, dropping the resulting w
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Right-handed perspective projection for wgpu clip space (depth 0..1)
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Width / height
/// * `near`, `far` - Clip plane distances (both positive)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y * 0.5).tan();
    let range = far / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, range, -1.0],
        [0.0, 0.0, range * near, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let fwd = (target - eye).normalized();
    let right = fwd.cross(up).normalized();
    let cam_up = right.cross(fwd);

    [
        [right.x, cam_up.x, -fwd.x, 0.0],
        [right.y, cam_up.y, -fwd.y, 0.0],
        [right.z, cam_up.z, -fwd.z, 0.0],
        [-right.dot(eye), -cam_up.dot(eye), fwd.dot(eye), 1.0],
    ]
}

/// Model matrix from translation, rotation, and uniform scale
///
/// Applies scale, then rotation, then translation.
pub fn from_translation_rotation_scale(translation: Vec3, rotation: Quat, scale: f32) -> Mat4 {
    let mut m = rotation.to_matrix();
    for col in m.iter_mut().take(3) {
        for v in col.iter_mut().take(3) {
            *v *= scale;
        }
    }
    m[3][0] = translation.x;
    m[3][1] = translation.y;
    m[3][2] = translation.z;
    m
}
