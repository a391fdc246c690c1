//! Rigid body types

use crate::material::PhysicsMaterial;
use crate::shapes::{BoxShape, Collider};
use drivebox_math::{Plane, Quat, Vec3};
use slotmap::new_key_type;

new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing so a handle to a removed body returns None
    /// instead of aliasing whatever body reused the slot.
    pub struct BodyKey;
}

/// A rigid body with position, orientation, and velocities
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Position of the center of mass (world coordinates)
    pub position: Vec3,
    /// Orientation as a unit quaternion
    pub orientation: Quat,
    /// Linear velocity (units per second)
    pub velocity: Vec3,
    /// Angular velocity (radians per second, axis-scaled)
    pub angular_velocity: Vec3,
    /// Mass of the body (ignored for static bodies)
    pub mass: f32,
    /// Accumulated force for the current step (cleared after integration)
    pub force: Vec3,
    /// Accumulated torque for the current step (cleared after integration)
    pub torque: Vec3,
    /// Whether this body is affected by gravity
    pub affected_by_gravity: bool,
    /// The collision shape of this body
    pub collider: Collider,
    /// Surface material used when resolving contacts
    pub material: PhysicsMaterial,
    /// Static bodies never move (mass is treated as infinite)
    pub is_static: bool,
}

impl RigidBody {
    /// Create a dynamic body with a box collider
    pub fn new_box(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            affected_by_gravity: true,
            collider: Collider::Box(BoxShape::new(half_extents)),
            material: PhysicsMaterial::default(),
            is_static: false,
        }
    }

    /// Create a static plane body (the cannon-style mass-0 ground)
    pub fn new_static_plane(plane: Plane) -> Self {
        Self {
            position: plane.normal * plane.offset,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 0.0,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            affected_by_gravity: false,
            collider: Collider::Plane(plane),
            material: PhysicsMaterial::default(),
            is_static: true,
        }
    }

    /// Set the mass of this body
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the initial velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the initial orientation of this body
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the surface material of this body
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Set whether this body is affected by gravity
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    /// Accumulate a force through the center of mass (no torque)
    pub fn apply_force(&mut self, force: Vec3) {
        if self.is_static {
            return;
        }
        self.force += force;
    }

    /// Accumulate a force applied at a world-space point
    ///
    /// A point away from the center of mass also contributes torque,
    /// matching the `applyForce(force, worldPoint)` surface of the usual
    /// rigid body engines.
    pub fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) {
        if self.is_static {
            return;
        }
        self.force += force;
        self.torque += (point - self.position).cross(force);
    }

    /// Directly set the angular velocity (used by the turn keys)
    pub fn set_angular_velocity(&mut self, omega: Vec3) {
        if self.is_static {
            return;
        }
        self.angular_velocity = omega;
    }

    /// Clear force and torque accumulators (called after integration)
    pub fn clear_accumulators(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    /// Apply a positional correction (from collision resolution)
    pub fn apply_correction(&mut self, correction: Vec3) {
        self.position += correction;
    }
}
