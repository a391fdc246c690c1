//! Physics world and simulation stepping

use crate::body::{BodyKey, RigidBody};
use crate::collision::box_vs_plane;
use crate::material::PhysicsMaterial;
use crate::shapes::Collider;
use drivebox_math::{Plane, Vec3};
use slotmap::SlotMap;

/// The fixed simulation timestep: one step per display frame
///
/// The frame loop advances the world by exactly this much per frame
/// regardless of wall-clock time, so simulation speed is coupled to the
/// display refresh rate. Accepted limitation of the demo.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration vector
    pub gravity: Vec3,
    /// Per-second fraction of linear velocity lost to drag
    pub linear_damping: f32,
    /// Per-second fraction of angular velocity lost to drag
    pub angular_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            linear_damping: 0.01,
            angular_damping: 0.01,
        }
    }
}

impl PhysicsConfig {
    /// Create a config with the given gravity and default damping
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }
}

/// The physics world containing all rigid bodies
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            config,
        }
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody> {
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Force/gravity accumulation into velocities, damping
    /// 2. Velocity integration into position and orientation
    /// 3. Box-vs-plane contact detection and resolution
    pub fn step(&mut self, dt: f32) {
        // Phase 1: integrate
        for (_key, body) in &mut self.bodies {
            if body.is_static {
                continue;
            }

            if body.affected_by_gravity {
                body.velocity += self.config.gravity * dt;
            }

            if body.mass > 0.0 {
                let inv_mass = 1.0 / body.mass;
                body.velocity += body.force * (dt * inv_mass);
                // No full inertia tensor; a unit-scaled inertia is enough for
                // the demo's keyboard nudges.
                body.angular_velocity += body.torque * (dt * inv_mass);
            }

            // Cannon-style damping: v *= (1 - d)^dt
            body.velocity *= (1.0 - self.config.linear_damping).powf(dt);
            body.angular_velocity *= (1.0 - self.config.angular_damping).powf(dt);

            body.position += body.velocity * dt;
            body.orientation = body.orientation.integrate(body.angular_velocity, dt);

            body.clear_accumulators();
        }

        // Phase 2: resolve contacts against static planes
        self.resolve_plane_contacts();
    }

    /// Resolve collisions between dynamic boxes and static planes
    fn resolve_plane_contacts(&mut self) {
        // Collect the static planes first; bodies are mutated below.
        let planes: Vec<(Plane, PhysicsMaterial)> = self
            .bodies
            .iter()
            .filter(|(_, b)| b.is_static)
            .filter_map(|(_, b)| match b.collider {
                Collider::Plane(plane) => Some((plane, b.material)),
                Collider::Box(_) => None,
            })
            .collect();

        for (_key, body) in &mut self.bodies {
            if body.is_static {
                continue;
            }
            let shape = match body.collider {
                Collider::Box(shape) => shape,
                Collider::Plane(_) => continue,
            };

            for (plane, plane_material) in &planes {
                let contact = box_vs_plane(&shape, body.position, body.orientation, plane);

                if let Some(contact) = contact {
                    if !contact.is_colliding() {
                        continue;
                    }

                    // Push the body out of the plane
                    body.apply_correction(contact.normal * contact.penetration);

                    let combined = body.material.combine(plane_material);

                    let velocity_along_normal = body.velocity.dot(contact.normal);
                    if velocity_along_normal < 0.0 {
                        // Remove the normal component of velocity and optionally bounce
                        let normal_velocity = contact.normal * velocity_along_normal;
                        body.velocity -= normal_velocity * (1.0 + combined.restitution);

                        // Apply friction to the tangent velocity
                        let tangent_velocity =
                            body.velocity - contact.normal * body.velocity.dot(contact.normal);
                        if tangent_velocity.length() > 0.0001 {
                            let friction_factor = 1.0 - combined.friction;
                            body.velocity = contact.normal * body.velocity.dot(contact.normal)
                                + tangent_velocity * friction_factor;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timestep_value() {
        assert!((FIXED_TIMESTEP - 1.0 / 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, Vec3::new(0.0, -9.82, 0.0));
    }

    /// Helper to create a world with a ground plane at the given height
    fn world_with_ground(gravity: Vec3, ground_y: f32, material: PhysicsMaterial) -> PhysicsWorld {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(gravity));
        world.add_body(RigidBody::new_static_plane(Plane::ground(ground_y)).with_material(material));
        world
    }

    #[test]
    fn test_world_add_and_get_body() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);

        let key = world.add_body(RigidBody::new_box(Vec3::new(0.0, 5.0, 0.0), Vec3::splat(0.5)));
        assert_eq!(world.body_count(), 1);
        let body = world.get_body(key).expect("body should exist");
        assert_eq!(body.position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_box(Vec3::ZERO, Vec3::splat(0.5)));

        assert!(world.remove_body(key).is_some());
        assert!(world.get_body(key).is_none());

        // A new body gets a different key; the old key stays dead
        let new_key = world.add_body(RigidBody::new_box(Vec3::X, Vec3::splat(0.5)));
        assert!(world.get_body(key).is_none());
        assert!(world.get_body(new_key).is_some());
    }

    #[test]
    fn test_gravity_application() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_box(Vec3::new(0.0, 10.0, 0.0), Vec3::splat(0.5)));

        world.step(0.1);

        let body = world.get_body(key).unwrap();
        // Velocity gains roughly g * dt (slightly less due to damping)
        assert!(body.velocity.y < -0.9);
        assert!(body.velocity.y > -1.0);
    }

    #[test]
    fn test_velocity_integration() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            gravity: Vec3::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
        });
        let key = world.add_body(
            RigidBody::new_box(Vec3::ZERO, Vec3::splat(0.5))
                .with_velocity(Vec3::new(10.0, 0.0, 0.0)),
        );

        world.step(1.0);

        let body = world.get_body(key).unwrap();
        assert!((body.position.x - 10.0).abs() < 0.0001);
    }

    #[test]
    fn test_force_accelerates_by_f_over_m() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            gravity: Vec3::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
        });
        let key = world.add_body(
            RigidBody::new_box(Vec3::ZERO, Vec3::splat(0.5)).with_mass(2.0),
        );

        world.get_body_mut(key).unwrap().apply_force(Vec3::new(0.0, 0.0, -100.0));
        world.step(FIXED_TIMESTEP);

        let body = world.get_body(key).unwrap();
        // dv = F/m * dt = -100/2 * (1/60)
        let expected = -100.0 / 2.0 * FIXED_TIMESTEP;
        assert!((body.velocity.z - expected).abs() < 0.0001);
    }

    #[test]
    fn test_force_cleared_after_step() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            gravity: Vec3::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
        });
        let key = world.add_body(RigidBody::new_box(Vec3::ZERO, Vec3::splat(0.5)));

        world.get_body_mut(key).unwrap().apply_force(Vec3::new(0.0, 0.0, -60.0));
        world.step(FIXED_TIMESTEP);
        let v1 = world.get_body(key).unwrap().velocity.z;

        // Second step without a fresh force: velocity unchanged
        world.step(FIXED_TIMESTEP);
        let v2 = world.get_body(key).unwrap().velocity.z;
        assert!((v1 - v2).abs() < 0.0001);
    }

    #[test]
    fn test_angular_velocity_rotates_body() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            gravity: Vec3::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
        });
        let key = world.add_body(RigidBody::new_box(Vec3::ZERO, Vec3::splat(0.5)));

        world
            .get_body_mut(key)
            .unwrap()
            .set_angular_velocity(Vec3::new(0.0, 1.0, 0.0));

        for _ in 0..60 {
            world.step(FIXED_TIMESTEP);
        }

        let body = world.get_body(key).unwrap();
        // After one second at 1 rad/s the orientation differs from identity
        assert!((body.orientation.w - 1.0).abs() > 0.01);
        // and stays a unit quaternion
        assert!((body.orientation.magnitude() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_static_plane(Plane::ground(0.0)));

        world.step(1.0);

        let body = world.get_body(key).unwrap();
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_ground_collision_pushes_box_out() {
        let mut world = world_with_ground(Vec3::ZERO, 0.0, PhysicsMaterial::ASPHALT);
        let key = world.add_body(
            RigidBody::new_box(Vec3::new(0.0, 0.3, 0.0), Vec3::splat(0.5)).with_gravity(false),
        );

        world.step(FIXED_TIMESTEP);

        let body = world.get_body(key).unwrap();
        // Pushed up so the bottom face sits on the plane
        assert!(body.position.y >= 0.5 - 0.001);
    }

    #[test]
    fn test_ground_collision_kills_downward_velocity() {
        let mut world = world_with_ground(Vec3::ZERO, 0.0, PhysicsMaterial::new(0.5, 0.0));
        let key = world.add_body(
            RigidBody::new_box(Vec3::new(0.0, 0.55, 0.0), Vec3::splat(0.5))
                .with_velocity(Vec3::new(0.0, -10.0, 0.0))
                .with_material(PhysicsMaterial::new(0.5, 0.0))
                .with_gravity(false),
        );

        world.step(0.1);

        let body = world.get_body(key).unwrap();
        assert!(body.velocity.y.abs() < 0.001, "got {}", body.velocity.y);
    }

    #[test]
    fn test_ground_collision_bounces_with_restitution() {
        let mut world = world_with_ground(Vec3::ZERO, 0.0, PhysicsMaterial::new(0.5, 1.0));
        let key = world.add_body(
            RigidBody::new_box(Vec3::new(0.0, 0.55, 0.0), Vec3::splat(0.5))
                .with_velocity(Vec3::new(0.0, -10.0, 0.0)),
        );

        world.step(0.1);

        let body = world.get_body(key).unwrap();
        assert!(body.velocity.y > 0.0, "perfect restitution should bounce");
    }

    #[test]
    fn test_friction_slows_sliding() {
        let mut world = world_with_ground(Vec3::new(0.0, -9.82, 0.0), 0.0, PhysicsMaterial::RUBBER);
        let key = world.add_body(
            RigidBody::new_box(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.5))
                .with_velocity(Vec3::new(10.0, -1.0, 0.0))
                .with_material(PhysicsMaterial::RUBBER),
        );

        world.step(FIXED_TIMESTEP);

        let body = world.get_body(key).unwrap();
        assert!(body.velocity.x < 5.0, "high friction should bite, got {}", body.velocity.x);
    }

    #[test]
    fn test_resting_box_stays_put_over_many_steps() {
        let mut world = world_with_ground(Vec3::new(0.0, -9.82, 0.0), 0.0, PhysicsMaterial::ASPHALT);
        let key = world.add_body(RigidBody::new_box(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.5)));

        for _ in 0..600 {
            world.step(FIXED_TIMESTEP);
        }

        let body = world.get_body(key).unwrap();
        assert!((body.position.y - 0.5).abs() < 0.05, "got y={}", body.position.y);
        assert!(body.position.x.abs() < 0.001);
        assert!(body.position.z.abs() < 0.001);
    }
}
