//! Collision detection
//!
//! The demo's collision scope is an oriented box against an infinite plane
//! (the car or an obstacle crate resting on the ground).

use crate::shapes::BoxShape;
use drivebox_math::{Plane, Quat, Vec3};

/// A contact point from a collision test
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// World-space contact point
    pub point: Vec3,
    /// Contact normal, pointing from the surface toward the body
    pub normal: Vec3,
    /// Penetration depth (positive = overlapping)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec3, normal: Vec3, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Whether this contact represents an actual overlap
    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Oriented box vs infinite plane
///
/// Tests all 8 corners against the plane and reports the deepest one.
/// Returns None when no corner is at or below the plane surface.
pub fn box_vs_plane(
    shape: &BoxShape,
    position: Vec3,
    orientation: Quat,
    plane: &Plane,
) -> Option<Contact> {
    let mut deepest: Option<Contact> = None;

    for corner in shape.corners(position, orientation) {
        let dist = plane.distance_to(corner);
        if dist < 0.0 {
            let penetration = -dist;
            let replace = match &deepest {
                Some(c) => penetration > c.penetration,
                None => true,
            };
            if replace {
                deepest = Some(Contact::new(corner, plane.normal, penetration));
            }
        }
    }

    deepest
}
