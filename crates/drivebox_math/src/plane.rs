//! Infinite plane type
//!
//! Shared between the physics crate (ground collision) and the render crate
//! (ground mesh placement). Represented as a unit normal and a signed offset:
//! a point p lies on the plane when dot(normal, p) == offset.

use serde::{Serialize, Deserialize};
use crate::Vec3;

/// An infinite plane: dot(normal, p) = offset
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal of the plane
    pub normal: Vec3,
    /// Signed distance from the origin along the normal
    pub offset: f32,
}

impl Plane {
    /// Create a plane from a normal and offset (normal is normalized)
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self {
            normal: normal.normalized(),
            offset,
        }
    }

    /// Horizontal ground plane at the given height (normal +Y)
    pub fn ground(y: f32) -> Self {
        Self {
            normal: Vec3::Y,
            offset: y,
        }
    }

    /// Signed distance from a point to the plane (positive = in front)
    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }

    /// Project a point onto the plane
    pub fn project(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_plane() {
        let plane = Plane::ground(0.0);
        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.distance_to(Vec3::new(5.0, 3.0, -2.0)), 3.0);
        assert_eq!(plane.distance_to(Vec3::new(0.0, -1.0, 0.0)), -1.0);
    }

    #[test]
    fn test_ground_plane_offset() {
        let plane = Plane::ground(2.0);
        assert_eq!(plane.distance_to(Vec3::new(0.0, 2.0, 0.0)), 0.0);
    }

    #[test]
    fn test_normal_is_normalized() {
        let plane = Plane::new(Vec3::new(0.0, 3.0, 0.0), 1.0);
        assert!((plane.normal.length() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_project() {
        let plane = Plane::ground(1.0);
        let projected = plane.project(Vec3::new(4.0, 7.0, -3.0));
        assert_eq!(projected, Vec3::new(4.0, 1.0, -3.0));
    }
}
