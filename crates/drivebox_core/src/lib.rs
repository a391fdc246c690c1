//! Core types for the DriveBox demo
//!
//! This crate provides the foundational types for the driving sandbox:
//!
//! - [`Transform`] - Position, rotation, and scale
//! - [`Material`] - Visual properties of an entity
//! - [`Entity`] - An object in the world with transform, mesh, and material
//! - [`MeshSource`] - Where an entity's geometry comes from
//! - [`World`] - Container for all entities, paired with a physics world
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`EntityTemplate`] / [`Scene`] - Serializable scene descriptions
//! - [`MeshData`] / [`ModelLoadHandle`] - Model assets and background loading

mod asset_error;
mod entity;
mod loader;
mod model;
mod scene;
mod transform;
mod world;

pub use asset_error::AssetError;
pub use entity::{BodyTemplate, DirtyFlags, Entity, EntityTemplate, Material, MeshSource};
pub use loader::{LoadState, ModelLoadHandle};
pub use model::MeshData;
pub use scene::{Scene, SceneLoadError, SceneSaveError};
pub use transform::Transform;
pub use world::{EntityKey, World};

// Re-export commonly used types from drivebox_math for convenience
pub use drivebox_math::{Mat4, Plane, Quat, Vec3};

// Re-export physics types for convenient access through drivebox_core
pub use drivebox_physics::{
    BodyKey, PhysicsConfig, PhysicsMaterial, PhysicsWorld, RigidBody, FIXED_TIMESTEP,
};
