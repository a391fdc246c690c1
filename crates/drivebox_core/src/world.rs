//! World container for entities
//!
//! The World manages all entities in the simulation and their link to physics.

use crate::entity::{BodyTemplate, DirtyFlags, Entity, EntityTemplate};
use drivebox_math::Plane;
use drivebox_physics::{PhysicsConfig, PhysicsWorld, RigidBody};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// A generational key identifying an entity in a World
    pub struct EntityKey;
}

/// The world containing all entities
///
/// The World is the central container for all game objects.
/// It manages entities and integrates with physics simulation.
pub struct World {
    /// All entities in the world
    entities: SlotMap<EntityKey, Entity>,
    /// Optional physics simulation (None = no physics)
    physics_world: Option<PhysicsWorld>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            physics_world: None,
        }
    }

    /// Enable physics for this world
    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.physics_world = Some(PhysicsWorld::with_config(config));
        self
    }

    /// Get the physics world (if enabled)
    pub fn physics(&self) -> Option<&PhysicsWorld> {
        self.physics_world.as_ref()
    }

    /// Get mutable physics world (if enabled)
    pub fn physics_mut(&mut self) -> Option<&mut PhysicsWorld> {
        self.physics_world.as_mut()
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity from the world, also removing its physics body
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let entity = self.entities.remove(key)?;
        if let (Some(body_key), Some(physics)) = (entity.physics_body, self.physics_world.as_mut())
        {
            physics.remove_body(body_key);
        }
        Some(entity)
    }

    /// Get a reference to an entity by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<EntityKey> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
            .map(|(k, _)| k)
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Instantiate a template: create its physics body (if any) and the entity
    ///
    /// The entity's `physics_body` key is the only link between the two
    /// worlds, so entity and body creation order does not matter elsewhere.
    pub fn spawn(&mut self, template: &EntityTemplate) -> EntityKey {
        let mut entity = template.to_entity();

        if let (Some(body_template), Some(physics)) =
            (&template.body, self.physics_world.as_mut())
        {
            let body = match body_template {
                BodyTemplate::DynamicBox { mass, half_extents } => {
                    RigidBody::new_box(template.transform.position, *half_extents)
                        .with_mass(*mass)
                        .with_orientation(template.transform.rotation)
                }
                BodyTemplate::StaticGround => {
                    RigidBody::new_static_plane(Plane::ground(template.transform.position.y))
                }
            };
            let key = physics.add_body(body);
            entity = entity.with_physics_body(key);
        }

        self.add_entity(entity)
    }

    /// Update the world by stepping physics and syncing entity transforms
    ///
    /// This method:
    /// 1. Steps the physics simulation (if enabled)
    /// 2. Copies position and orientation from each physics body to its
    ///    paired entity
    ///
    /// The copy is one-way. Physics owns the pose of every paired entity;
    /// writing to such an entity's transform elsewhere is overwritten here.
    pub fn update(&mut self, dt: f32) {
        if let Some(ref mut physics) = self.physics_world {
            physics.step(dt);
        }

        if let Some(ref physics) = self.physics_world {
            for (_key, entity) in &mut self.entities {
                if let Some(body_key) = entity.physics_body {
                    if let Some(body) = physics.get_body(body_key) {
                        entity.transform.position = body.position;
                        entity.transform.rotation = body.orientation;
                        entity.mark_dirty(DirtyFlags::TRANSFORM);
                    }
                }
            }
        }
    }

    /// Clear all entities from the world
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Iterate over all entities
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate over all entities mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// Iterate over keys and entities
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }
}
