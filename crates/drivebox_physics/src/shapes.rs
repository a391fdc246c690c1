//! Collision shapes
//!
//! Lightweight primitives used for collision detection, separate from the
//! renderable meshes in drivebox_render.

use drivebox_math::{Plane, Quat, Vec3};

/// A box collider defined by its half-extents, oriented by the owning body
#[derive(Clone, Copy, Debug)]
pub struct BoxShape {
    /// Half the size of the box along each local axis
    pub half_extents: Vec3,
}

impl BoxShape {
    /// Create a new box with the given half-extents
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// Create a unit cube (half-extents 0.5)
    pub fn unit() -> Self {
        Self::new(Vec3::splat(0.5))
    }

    /// World-space positions of the 8 corners for a box at `position` with
    /// orientation `orientation`
    pub fn corners(&self, position: Vec3, orientation: Quat) -> [Vec3; 8] {
        let h = self.half_extents;
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            // Binary indexing: bit 0 = x sign, bit 1 = y sign, bit 2 = z sign
            let local = Vec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            );
            *corner = position + orientation.rotate(local);
        }
        corners
    }
}

/// The collision shape of a rigid body
#[derive(Clone, Copy, Debug)]
pub enum Collider {
    /// An oriented box (the car, obstacle crates)
    Box(BoxShape),
    /// An infinite plane (the ground)
    Plane(Plane),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_box() {
        let b = BoxShape::unit();
        assert_eq!(b.half_extents, Vec3::splat(0.5));
    }

    #[test]
    fn test_corners_axis_aligned() {
        let b = BoxShape::new(Vec3::new(1.0, 2.0, 3.0));
        let corners = b.corners(Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY);

        // All corners offset from center by exactly the half-extents
        for c in corners {
            assert_eq!((c.x - 10.0).abs(), 1.0);
            assert_eq!(c.y.abs(), 2.0);
            assert_eq!(c.z.abs(), 3.0);
        }
    }

    #[test]
    fn test_corners_rotated() {
        use std::f32::consts::PI;

        // A 45-degree yaw makes the box's X corners reach sqrt(2) in world XZ
        let b = BoxShape::new(Vec3::splat(1.0));
        let q = Quat::from_rotation_y(PI / 4.0);
        let corners = b.corners(Vec3::ZERO, q);

        let max_x = corners.iter().map(|c| c.x).fold(f32::MIN, f32::max);
        assert!((max_x - 2.0f32.sqrt()).abs() < 0.0001, "got {}", max_x);
    }

    #[test]
    fn test_corners_cover_all_octants() {
        let b = BoxShape::unit();
        let corners = b.corners(Vec3::ZERO, Quat::IDENTITY);

        let mut seen = std::collections::HashSet::new();
        for c in corners {
            seen.insert((c.x > 0.0, c.y > 0.0, c.z > 0.0));
        }
        assert_eq!(seen.len(), 8);
    }
}
