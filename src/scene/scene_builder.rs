//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building driving scenes, plus the fallback
//! scene used when no scene file is found on disk.

use drivebox_core::{BodyTemplate, EntityTemplate, Material, MeshSource, Scene, Transform};
use drivebox_math::Vec3;

/// Builder for constructing driving scenes
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new("Main")
///     .with_gravity(Vec3::new(0.0, -9.82, 0.0))
///     .add_ground(50.0)
///     .add_car("car", Vec3::new(0.0, 4.0, 0.0), 1500.0, Vec3::new(1.0, 0.5, 2.0))
///     .build();
/// ```
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: Scene::new(name),
        }
    }

    /// Set the gravity for the scene
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.scene = self.scene.with_gravity(gravity);
        self
    }

    /// Add a static ground plane at y=0
    ///
    /// This adds both the collision plane and the visual checkered floor.
    pub fn add_ground(mut self, half_size: f32) -> Self {
        self.scene.add_entity(
            EntityTemplate::new(
                MeshSource::Ground { half_size },
                Transform::identity(),
                Material::GRAY,
            )
            .with_name("ground")
            .with_tag("static")
            .with_body(BodyTemplate::StaticGround),
        );
        self
    }

    /// Add a drivable car and make it the drive target
    ///
    /// The car is a dynamic box body; keyboard forces are routed to it.
    pub fn add_car(
        mut self,
        name: &str,
        position: Vec3,
        mass: f32,
        half_extents: Vec3,
    ) -> Self {
        self.scene.add_entity(
            EntityTemplate::new(
                MeshSource::Box { half_extents },
                Transform::from_position(position),
                Material::RED,
            )
            .with_name(name)
            .with_tag("dynamic")
            .with_body(BodyTemplate::DynamicBox { mass, half_extents }),
        );
        self.scene = self.scene.with_drive_target(name);
        self
    }

    /// Add a car whose visual mesh is loaded from a model file
    ///
    /// The physics body is still a box; the model only replaces the visuals.
    /// Until the model finishes loading the car renders as a placeholder box.
    pub fn add_model_car(
        mut self,
        name: &str,
        model_path: &str,
        position: Vec3,
        mass: f32,
        half_extents: Vec3,
    ) -> Self {
        self.scene.add_entity(
            EntityTemplate::new(
                MeshSource::Model { path: model_path.to_string() },
                Transform::from_position(position),
                Material::RED,
            )
            .with_name(name)
            .with_tag("dynamic")
            .with_body(BodyTemplate::DynamicBox { mass, half_extents }),
        );
        self.scene = self.scene.with_drive_target(name);
        self
    }

    /// Add a dynamic obstacle box
    pub fn add_box(
        mut self,
        name: &str,
        position: Vec3,
        mass: f32,
        half_extents: Vec3,
        material: Material,
    ) -> Self {
        self.scene.add_entity(
            EntityTemplate::new(
                MeshSource::Box { half_extents },
                Transform::from_position(position),
                material,
            )
            .with_name(name)
            .with_tag("dynamic")
            .with_body(BodyTemplate::DynamicBox { mass, half_extents }),
        );
        self
    }

    /// Add a custom entity template
    ///
    /// For entities that don't fit the standard patterns.
    pub fn add_entity(mut self, entity: EntityTemplate) -> Self {
        self.scene.add_entity(entity);
        self
    }

    /// Build the scene
    pub fn build(self) -> Scene {
        self.scene
    }
}

/// The scene used when no scene file exists on disk: a 100x100 ground
/// plane and a single drivable car dropped from above it.
pub fn default_scene() -> Scene {
    SceneBuilder::new("Default")
        .with_gravity(Vec3::new(0.0, -9.82, 0.0))
        .add_ground(50.0)
        .add_car("car", Vec3::new(0.0, 4.0, 0.0), 1500.0, Vec3::new(1.0, 0.5, 2.0))
        .build()
}
