//! Rendering library for the DriveBox demo
//!
//! This crate provides the wgpu-based forward renderer.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::OrbitCamera`] - Camera orbiting the scene center
//! - [`pipeline::MeshPipeline`] - Lit mesh rendering
//! - [`geometry`] - CPU-side mesh building for primitives and model assets

pub mod camera;
pub mod context;
pub mod geometry;
pub mod pipeline;

pub use camera::OrbitCamera;
pub use context::RenderContext;
pub use geometry::{box_mesh, build_mesh, ground_mesh, model_mesh, MeshBuffers};
pub use pipeline::{GlobalUniforms, GpuMesh, MeshPipeline, ModelUniforms, Vertex};

// Re-export core types for convenience
pub use drivebox_core::{Entity, EntityKey, Material, MeshSource, Transform, World};
pub use drivebox_math::{Mat4, Quat, Vec3};
