//! Scene serialization
//!
//! Provides the Scene struct for loading/saving scenes from RON files.
//! Scenes contain entity templates, physics settings, and the name of the
//! entity that keyboard driving forces are applied to.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::entity::EntityTemplate;
use crate::World;
use drivebox_math::Vec3;
use drivebox_physics::PhysicsConfig;

/// A serializable scene containing entity templates
///
/// Scenes are loaded from RON files and contain all the data needed
/// to populate a world: entities, physics settings, and the drive target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Entity templates in this scene
    pub entities: Vec<EntityTemplate>,
    /// Gravity for physics, defaults to (0, -9.82, 0) when absent
    #[serde(default)]
    pub gravity: Option<Vec3>,
    /// Name of the entity that receives keyboard driving forces
    #[serde(default)]
    pub drive_target: Option<String>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            gravity: None,
            drive_target: None,
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add an entity template to this scene
    pub fn add_entity(&mut self, entity: EntityTemplate) {
        self.entities.push(entity);
    }

    /// Set the gravity for this scene
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = Some(gravity);
        self
    }

    /// Set the name of the entity keyboard forces are applied to
    pub fn with_drive_target(mut self, name: impl Into<String>) -> Self {
        self.drive_target = Some(name.into());
        self
    }

    /// Instantiate this scene into a live world with physics enabled
    ///
    /// `config_override` takes precedence over the scene's own gravity.
    pub fn instantiate(&self, config_override: Option<PhysicsConfig>) -> World {
        let config = match (config_override, self.gravity) {
            (Some(config), _) => config,
            (None, Some(gravity)) => PhysicsConfig::new(gravity),
            (None, None) => PhysicsConfig::default(),
        };

        let mut world = World::new().with_physics(config);
        for template in &self.entities {
            world.spawn(template);
        }
        world
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BodyTemplate, MeshSource};
    use crate::{Material, Transform};

    #[test]
    fn test_scene_new() {
        let scene = Scene::new("Test Scene");
        assert_eq!(scene.name, "Test Scene");
        assert!(scene.entities.is_empty());
        assert!(scene.gravity.is_none());
        assert!(scene.drive_target.is_none());
    }

    #[test]
    fn test_scene_with_gravity() {
        let scene = Scene::new("Test").with_gravity(Vec3::new(0.0, -20.0, 0.0));
        assert_eq!(scene.gravity, Some(Vec3::new(0.0, -20.0, 0.0)));
    }

    #[test]
    fn test_scene_add_entity() {
        let mut scene = Scene::new("Test");
        scene.add_entity(EntityTemplate::new(
            MeshSource::unit_box(),
            Transform::identity(),
            Material::WHITE,
        ));
        assert_eq!(scene.entities.len(), 1);
    }

    #[test]
    fn test_scene_serialization_round_trip() {
        let mut scene = Scene::new("Test Scene")
            .with_gravity(Vec3::new(0.0, -9.82, 0.0))
            .with_drive_target("car");

        let entity = EntityTemplate::new(
            MeshSource::Box { half_extents: Vec3::new(1.0, 0.5, 2.0) },
            Transform::from_position(Vec3::new(0.0, 4.0, 0.0)),
            Material::RED,
        )
        .with_name("car")
        .with_tag("dynamic")
        .with_body(BodyTemplate::DynamicBox {
            mass: 1500.0,
            half_extents: Vec3::new(1.0, 0.5, 2.0),
        });
        scene.add_entity(entity);

        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let serialized = ron::ser::to_string_pretty(&scene, pretty).unwrap();

        assert!(serialized.contains("Test Scene"));
        assert!(serialized.contains("car"));
        assert!(serialized.contains("DynamicBox"));

        let deserialized: Scene = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized.name, "Test Scene");
        assert_eq!(deserialized.drive_target, Some("car".to_string()));
        assert_eq!(deserialized.entities.len(), 1);
        assert_eq!(deserialized.entities[0].name, Some("car".to_string()));
    }

    #[test]
    fn test_parse_scene_file_format() {
        // Matches the on-disk format under assets/scenes/
        let scene_ron = r#"
Scene(
    name: "Main",
    entities: [
        EntityTemplate(
            name: Some("ground"),
            tags: ["static"],
            transform: Transform(
                position: Vec3(x: 0.0, y: 0.0, z: 0.0),
                rotation: Quat(x: 0.0, y: 0.0, z: 0.0, w: 1.0),
                scale: 1.0,
            ),
            mesh: Ground(half_size: 50.0),
            material: Material(base_color: (0.5, 0.5, 0.5, 1.0)),
            body: Some(StaticGround),
        ),
        EntityTemplate(
            name: Some("car"),
            tags: ["dynamic"],
            transform: Transform(
                position: Vec3(x: 0.0, y: 4.0, z: 0.0),
                rotation: Quat(x: 0.0, y: 0.0, z: 0.0, w: 1.0),
                scale: 1.0,
            ),
            mesh: Model(path: "models/car.ron"),
            material: Material(base_color: (0.8, 0.1, 0.1, 1.0)),
            body: Some(DynamicBox(
                mass: 1500.0,
                half_extents: Vec3(x: 1.0, y: 0.5, z: 2.0),
            )),
        ),
    ],
    gravity: Some(Vec3(x: 0.0, y: -9.82, z: 0.0)),
    drive_target: Some("car"),
)
"#;
        let scene: Scene = ron::from_str(scene_ron).unwrap();
        assert_eq!(scene.name, "Main");
        assert_eq!(scene.gravity, Some(Vec3::new(0.0, -9.82, 0.0)));
        assert_eq!(scene.drive_target, Some("car".to_string()));
        assert_eq!(scene.entities.len(), 2);

        assert_eq!(scene.entities[0].name, Some("ground".to_string()));
        assert_eq!(scene.entities[0].body, Some(BodyTemplate::StaticGround));
        match &scene.entities[0].mesh {
            MeshSource::Ground { half_size } => assert_eq!(*half_size, 50.0),
            other => panic!("Expected Ground mesh, got {:?}", other),
        }

        assert_eq!(scene.entities[1].name, Some("car".to_string()));
        match &scene.entities[1].body {
            Some(BodyTemplate::DynamicBox { mass, half_extents }) => {
                assert_eq!(*mass, 1500.0);
                assert_eq!(*half_extents, Vec3::new(1.0, 0.5, 2.0));
            }
            other => panic!("Expected DynamicBox body, got {:?}", other),
        }
    }

    #[test]
    fn test_instantiate_creates_bodies() {
        let mut scene = Scene::new("Main").with_drive_target("car");
        scene.add_entity(
            EntityTemplate::new(
                MeshSource::Ground { half_size: 50.0 },
                Transform::identity(),
                Material::GRAY,
            )
            .with_name("ground")
            .with_body(BodyTemplate::StaticGround),
        );
        scene.add_entity(
            EntityTemplate::new(
                MeshSource::unit_box(),
                Transform::from_position(Vec3::new(0.0, 4.0, 0.0)),
                Material::RED,
            )
            .with_name("car")
            .with_body(BodyTemplate::DynamicBox {
                mass: 1500.0,
                half_extents: Vec3::new(1.0, 0.5, 2.0),
            }),
        );

        let world = scene.instantiate(None);
        assert_eq!(world.entity_count(), 2);
        assert_eq!(world.physics().unwrap().body_count(), 2);

        let car_key = world.find_by_name("car").unwrap();
        assert!(world.get_entity(car_key).unwrap().physics_body.is_some());
    }

    #[test]
    fn test_instantiate_override_physics() {
        let scene = Scene::new("Test").with_gravity(Vec3::new(0.0, -10.0, 0.0));
        let world = scene.instantiate(Some(PhysicsConfig::new(Vec3::new(0.0, -30.0, 0.0))));
        assert_eq!(
            world.physics().unwrap().config.gravity,
            Vec3::new(0.0, -30.0, 0.0)
        );
    }

    #[test]
    fn test_scene_load_missing_file() {
        let result = Scene::load("/nonexistent/scene.ron");
        match result {
            Err(SceneLoadError::Io(_)) => {}
            other => panic!("Expected Io error, got {:?}", other.map(|s| s.name)),
        }
    }
}
