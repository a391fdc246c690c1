//! 3D Mathematics Library
//!
//! This crate provides the vector, rotation, and matrix types for the
//! drivebox engine.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion for 3D rotation
//! - [`Mat4`] - 4x4 matrix for transformations and projection
//! - [`Plane`] - Infinite plane (normal + offset from origin)

mod vec3;
mod quat;
pub mod mat4;
mod plane;

pub use vec3::Vec3;
pub use quat::Quat;
pub use mat4::Mat4;
pub use plane::Plane;
