//! Entity and Material types
//!
//! An Entity represents an object in the world with a transform, mesh, and material.

use std::collections::HashSet;
use bitflags::bitflags;
use drivebox_math::Vec3;
use drivebox_physics::BodyKey;
use serde::{Deserialize, Serialize};
use crate::Transform;

bitflags! {
    /// Flags indicating which parts of an entity have changed and need updating
    ///
    /// Used for dirty tracking to avoid re-uploading all geometry when only
    /// some entities have changed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Mesh has changed
        const MESH = 1 << 1;
        /// Material has changed
        const MATERIAL = 1 << 2;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::MATERIAL.bits();
    }
}

/// A simple material with just a base color
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0], // White
        }
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
        }
    }

    /// Create a new opaque material with the given RGB color
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// White material
    pub const WHITE: Self = Self { base_color: [1.0, 1.0, 1.0, 1.0] };

    /// Gray material
    pub const GRAY: Self = Self { base_color: [0.5, 0.5, 0.5, 1.0] };

    /// Red material
    pub const RED: Self = Self { base_color: [1.0, 0.0, 0.0, 1.0] };

    /// Green material
    pub const GREEN: Self = Self { base_color: [0.0, 1.0, 0.0, 1.0] };

    /// Blue material
    pub const BLUE: Self = Self { base_color: [0.0, 0.0, 1.0, 1.0] };
}

/// Where an entity's mesh comes from
///
/// Primitives are generated procedurally; models are loaded from RON
/// mesh files under the assets directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeshSource {
    /// An axis-aligned box with the given half extents
    Box { half_extents: Vec3 },
    /// A flat ground plane, half_size units in each direction from the origin
    Ground { half_size: f32 },
    /// A mesh loaded from a model file, identified by its asset path
    Model { path: String },
}

impl MeshSource {
    /// Create a unit cube mesh source
    pub fn unit_box() -> Self {
        Self::Box { half_extents: Vec3::splat(0.5) }
    }
}

/// How an entity participates in the physics simulation
///
/// Stored in scene templates; the world resolves it into a rigid body
/// and records the resulting key on the entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyTemplate {
    /// A dynamic box body with the given mass and half extents
    DynamicBox { mass: f32, half_extents: Vec3 },
    /// A static ground plane at the entity's y position
    StaticGround,
}

/// An entity in the world
///
/// Each entity has:
/// - An optional name (for lookup by name)
/// - Tags (for categorization and filtering)
/// - A transform (position, rotation, scale)
/// - A mesh source (the geometry)
/// - A material (visual properties)
/// - An optional physics body key (links to PhysicsWorld)
/// - Dirty flags (for change tracking)
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    /// Tags for categorization (e.g., "dynamic", "static")
    pub tags: HashSet<String>,
    /// The entity's transform in world space
    pub transform: Transform,
    /// The entity's mesh source
    pub mesh: MeshSource,
    /// The entity's material
    pub material: Material,
    /// Optional physics body key (links to PhysicsWorld)
    ///
    /// The pairing is explicit: an entity with `None` here is purely
    /// visual and never touched by the physics sync.
    pub physics_body: Option<BodyKey>,
    /// Dirty flags for change tracking (what needs rebuilding)
    dirty: DirtyFlags,
}

impl Entity {
    /// Create a new entity with the given mesh source
    pub fn new(mesh: MeshSource) -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform: Transform::identity(),
            mesh,
            material: Material::default(),
            physics_body: None,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Create a new entity with mesh and material
    pub fn with_material(mesh: MeshSource, material: Material) -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform: Transform::identity(),
            mesh,
            material,
            physics_body: None,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Create a new entity with mesh, transform, and material
    pub fn with_transform(mesh: MeshSource, transform: Transform, material: Material) -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform,
            mesh,
            material,
            physics_body: None,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this entity
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add multiple tags to this entity
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for tag in tags {
            self.tags.insert(tag.into());
        }
        self
    }

    /// Check if this entity has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Attach a physics body to this entity
    pub fn with_physics_body(mut self, key: BodyKey) -> Self {
        self.physics_body = Some(key);
        self
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this entity as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Set the position and mark the transform as dirty
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the transform and mark it as dirty
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the material and mark it as dirty
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.mark_dirty(DirtyFlags::MATERIAL);
    }
}

/// A serializable entity template
///
/// EntityTemplate is used for scene serialization. It describes an entity
/// declaratively, including how (and whether) it participates in physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    /// Tags for categorization (e.g., "dynamic", "static")
    #[serde(default)]
    pub tags: Vec<String>,
    /// The entity's transform in world space
    pub transform: Transform,
    /// The entity's mesh source
    pub mesh: MeshSource,
    /// The entity's material
    pub material: Material,
    /// Optional physics body description
    #[serde(default)]
    pub body: Option<BodyTemplate>,
}

impl EntityTemplate {
    /// Create a new entity template
    pub fn new(mesh: MeshSource, transform: Transform, material: Material) -> Self {
        Self {
            name: None,
            tags: Vec::new(),
            transform,
            mesh,
            material,
            body: None,
        }
    }

    /// Set the name of this template
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this template
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the physics body description
    pub fn with_body(mut self, body: BodyTemplate) -> Self {
        self.body = Some(body);
        self
    }

    /// Convert this template to an Entity (without a physics body)
    ///
    /// The physics body described by `body` is created separately when the
    /// template is instantiated into a world.
    pub fn to_entity(&self) -> Entity {
        let mut entity = Entity::with_transform(
            self.mesh.clone(),
            self.transform,
            self.material,
        );
        if let Some(ref name) = self.name {
            entity = entity.with_name(name.clone());
        }
        for tag in &self.tags {
            entity = entity.with_tag(tag.clone());
        }
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_default() {
        let m = Material::default();
        assert_eq!(m.base_color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_material_new() {
        let m = Material::new(0.5, 0.6, 0.7, 0.8);
        assert_eq!(m.base_color, [0.5, 0.6, 0.7, 0.8]);
    }

    #[test]
    fn test_material_from_rgb() {
        let m = Material::from_rgb(0.5, 0.6, 0.7);
        assert_eq!(m.base_color, [0.5, 0.6, 0.7, 1.0]);
    }

    #[test]
    fn test_entity_new() {
        let entity = Entity::new(MeshSource::unit_box());

        assert_eq!(entity.mesh, MeshSource::Box { half_extents: Vec3::splat(0.5) });
        assert_eq!(entity.material.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert!(entity.physics_body.is_none());
    }

    #[test]
    fn test_entity_with_material() {
        let entity = Entity::with_material(MeshSource::unit_box(), Material::RED);
        assert_eq!(entity.material.base_color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_entity_with_transform() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let entity = Entity::with_transform(MeshSource::unit_box(), transform, Material::BLUE);

        assert_eq!(entity.transform.position.x, 1.0);
        assert_eq!(entity.material.base_color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_entity_tags() {
        let entity = Entity::new(MeshSource::unit_box())
            .with_tag("dynamic")
            .with_tags(["car", "player"]);

        assert!(entity.has_tag("dynamic"));
        assert!(entity.has_tag("car"));
        assert!(!entity.has_tag("static"));
    }

    // --- Dirty tracking tests ---

    #[test]
    fn test_dirty_flags_default() {
        let flags = DirtyFlags::default();
        assert_eq!(flags, DirtyFlags::NONE);
        assert!(flags.is_empty());
    }

    #[test]
    fn test_dirty_flags_all() {
        let flags = DirtyFlags::ALL;
        assert!(flags.contains(DirtyFlags::TRANSFORM));
        assert!(flags.contains(DirtyFlags::MESH));
        assert!(flags.contains(DirtyFlags::MATERIAL));
    }

    #[test]
    fn test_new_entity_is_dirty() {
        let entity = Entity::new(MeshSource::unit_box());
        assert!(entity.is_dirty());
        assert_eq!(entity.dirty_flags(), DirtyFlags::ALL);
    }

    #[test]
    fn test_entity_clear_dirty() {
        let mut entity = Entity::new(MeshSource::unit_box());

        assert!(entity.is_dirty());
        entity.clear_dirty();
        assert!(!entity.is_dirty());
        assert_eq!(entity.dirty_flags(), DirtyFlags::NONE);
    }

    #[test]
    fn test_set_position_marks_dirty() {
        let mut entity = Entity::new(MeshSource::unit_box());
        entity.clear_dirty();

        entity.set_position(Vec3::new(1.0, 2.0, 3.0));

        assert!(entity.is_dirty());
        assert!(entity.dirty_flags().contains(DirtyFlags::TRANSFORM));
        assert_eq!(entity.transform.position.x, 1.0);
    }

    #[test]
    fn test_set_material_marks_dirty() {
        let mut entity = Entity::new(MeshSource::unit_box());
        entity.clear_dirty();

        entity.set_material(Material::RED);

        assert!(entity.is_dirty());
        assert!(entity.dirty_flags().contains(DirtyFlags::MATERIAL));
        assert!(!entity.dirty_flags().contains(DirtyFlags::TRANSFORM));
    }

    #[test]
    fn test_mark_dirty_combines_flags() {
        let mut entity = Entity::new(MeshSource::unit_box());
        entity.clear_dirty();

        entity.mark_dirty(DirtyFlags::TRANSFORM);
        entity.mark_dirty(DirtyFlags::MATERIAL);

        let flags = entity.dirty_flags();
        assert!(flags.contains(DirtyFlags::TRANSFORM));
        assert!(flags.contains(DirtyFlags::MATERIAL));
        assert!(!flags.contains(DirtyFlags::MESH));
    }

    #[test]
    fn test_template_to_entity_carries_no_body() {
        let template = EntityTemplate::new(
            MeshSource::unit_box(),
            Transform::from_position(Vec3::new(0.0, 4.0, 0.0)),
            Material::GREEN,
        )
        .with_name("crate")
        .with_tag("dynamic")
        .with_body(BodyTemplate::DynamicBox {
            mass: 1.0,
            half_extents: Vec3::splat(0.5),
        });

        let entity = template.to_entity();
        assert_eq!(entity.name.as_deref(), Some("crate"));
        assert!(entity.has_tag("dynamic"));
        // The body key is wired when the template is instantiated into a world
        assert!(entity.physics_body.is_none());
    }
}
