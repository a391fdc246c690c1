//! Rigid body simulation for the drivebox sandbox
//!
//! This crate provides the physics half of the demo:
//! - Collision shapes (oriented boxes, infinite planes)
//! - Box-vs-plane contact generation
//! - Rigid body dynamics with gravity, forces, and angular velocity
//! - Fixed-timestep world stepping

pub mod body;
pub mod collision;
pub mod material;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, RigidBody};
pub use collision::{box_vs_plane, Contact};
pub use material::PhysicsMaterial;
pub use shapes::{BoxShape, Collider};
pub use world::{PhysicsConfig, PhysicsWorld, FIXED_TIMESTEP};
