//! Game simulation system
//!
//! Runs one frame of the simulation:
//! - Polls background model loads
//! - Routes keyboard driving input to the drive target's physics body
//! - Steps the world by exactly one fixed timestep
//!
//! Graphics always reads poses after this system has run, so entities
//! never show a half-stepped state.

use std::collections::HashMap;

use drivebox_core::{
    DirtyFlags, EntityKey, LoadState, MeshData, MeshSource, ModelLoadHandle, World,
    FIXED_TIMESTEP,
};
use drivebox_input::DriveController;

/// Manages the per-frame simulation loop
pub struct SimulationSystem {
    /// Entity that receives keyboard driving forces
    drive_key: Option<EntityKey>,
    /// Model loads still in flight
    pending_models: Vec<(EntityKey, ModelLoadHandle)>,
    /// Finished model loads, keyed by the entity using them
    loaded_models: HashMap<EntityKey, MeshData>,
}

impl SimulationSystem {
    /// Create a simulation system for the given world
    ///
    /// Resolves the drive target by name and kicks off a background load
    /// for every entity whose mesh comes from a model file.
    pub fn new(world: &World, drive_target: Option<&str>) -> Self {
        let drive_key = drive_target.and_then(|name| world.find_by_name(name));
        if drive_target.is_some() && drive_key.is_none() {
            log::warn!(
                "Drive target '{}' not found in scene; keyboard driving disabled",
                drive_target.unwrap_or_default()
            );
        }

        let mut pending_models = Vec::new();
        for (key, entity) in world.iter_with_keys() {
            if let MeshSource::Model { path } = &entity.mesh {
                log::info!("Loading model '{}' in the background", path);
                pending_models.push((key, ModelLoadHandle::spawn(path.clone())));
            }
        }

        Self {
            drive_key,
            pending_models,
            loaded_models: HashMap::new(),
        }
    }

    /// The entity keyboard forces are applied to
    pub fn drive_key(&self) -> Option<EntityKey> {
        self.drive_key
    }

    /// Finished model data for an entity, if its load has completed
    pub fn loaded_model(&self, key: EntityKey) -> Option<&MeshData> {
        self.loaded_models.get(&key)
    }

    /// Whether any model loads are still in flight
    pub fn has_pending_loads(&self) -> bool {
        !self.pending_models.is_empty()
    }

    /// Speed of the drive target in meters per second
    pub fn drive_speed(&self, world: &World) -> f32 {
        self.drive_key
            .and_then(|key| world.get_entity(key))
            .and_then(|entity| entity.physics_body)
            .and_then(|body_key| world.physics().and_then(|p| p.get_body(body_key)))
            .map(|body| body.velocity.length())
            .unwrap_or(0.0)
    }

    /// Run one simulation frame
    ///
    /// Steps physics by exactly one fixed timestep regardless of wall-clock
    /// frame time, matching the render cadence one-to-one.
    pub fn update(&mut self, world: &mut World, controller: &DriveController) {
        self.poll_model_loads(world);
        self.apply_drive_input(world, controller);
        world.update(FIXED_TIMESTEP);
    }

    /// Poll in-flight model loads without blocking
    ///
    /// A failed load logs a warning and leaves the placeholder mesh in
    /// place; the simulation keeps running.
    fn poll_model_loads(&mut self, world: &mut World) {
        let mut i = 0;
        while i < self.pending_models.len() {
            let state = self.pending_models[i].1.poll();
            match state {
                LoadState::Pending => {
                    i += 1;
                }
                LoadState::Ready(data) => {
                    let (key, handle) = self.pending_models.swap_remove(i);
                    log::info!(
                        "Model '{}' loaded ({} triangles)",
                        handle.path().display(),
                        data.triangle_count()
                    );
                    self.loaded_models.insert(key, data);
                    if let Some(entity) = world.get_entity_mut(key) {
                        entity.mark_dirty(DirtyFlags::MESH);
                    }
                }
                LoadState::Failed(e) => {
                    let (_, handle) = self.pending_models.swap_remove(i);
                    log::error!(
                        "Failed to load model '{}': {}. Keeping placeholder mesh.",
                        handle.path().display(),
                        e
                    );
                }
            }
        }
    }

    /// Route keyboard input to the drive target's body
    ///
    /// The drive force follows the body's current heading. While a turn key
    /// is held, angular velocity about Y is set directly; on release the
    /// body keeps its spin and angular damping winds it down.
    fn apply_drive_input(&self, world: &mut World, controller: &DriveController) {
        let Some(key) = self.drive_key else { return };
        let Some(body_key) = world.get_entity(key).and_then(|e| e.physics_body) else {
            return;
        };
        let Some(physics) = world.physics_mut() else { return };

        if let Some(body) = physics.get_body_mut(body_key) {
            let force = controller.drive_force_vector(body.orientation);
            body.apply_force_at_point(force, body.position);
            if controller.is_turning() {
                body.set_angular_velocity(controller.turn_angular_velocity());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivebox_core::{BodyTemplate, EntityTemplate, Material, Scene, Transform, Vec3};
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    fn car_scene() -> Scene {
        let mut scene = Scene::new("Test").with_drive_target("car");
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
                MeshSource::Box { half_extents: Vec3::new(1.0, 0.5, 2.0) },
                Transform::from_position(Vec3::new(0.0, 0.5, 0.0)),
                Material::RED,
            )
            .with_name("car")
            .with_body(BodyTemplate::DynamicBox {
                mass: 1500.0,
                half_extents: Vec3::new(1.0, 0.5, 2.0),
            }),
        );
        scene
    }

    #[test]
    fn test_resolves_drive_target() {
        let world = car_scene().instantiate(None);
        let simulation = SimulationSystem::new(&world, Some("car"));
        assert_eq!(simulation.drive_key(), world.find_by_name("car"));
    }

    #[test]
    fn test_missing_drive_target_disables_driving() {
        let world = car_scene().instantiate(None);
        let simulation = SimulationSystem::new(&world, Some("no_such_entity"));
        assert!(simulation.drive_key().is_none());
    }

    #[test]
    fn test_throttle_moves_car_forward() {
        let mut world = car_scene().instantiate(None);
        let mut simulation = SimulationSystem::new(&world, Some("car"));

        let mut controller = DriveController::new();
        controller.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed);

        for _ in 0..120 {
            simulation.update(&mut world, &controller);
        }

        let car_key = world.find_by_name("car").unwrap();
        let car = world.get_entity(car_key).unwrap();
        // Forward is -Z; ground friction keeps the pace modest
        assert!(car.transform.position.z < -0.001, "z = {}", car.transform.position.z);
        assert!(simulation.drive_speed(&world) > 0.0);
    }

    #[test]
    fn test_no_input_car_stays_put() {
        let mut world = car_scene().instantiate(None);
        let mut simulation = SimulationSystem::new(&world, Some("car"));
        let controller = DriveController::new();

        for _ in 0..120 {
            simulation.update(&mut world, &controller);
        }

        let car_key = world.find_by_name("car").unwrap();
        let car = world.get_entity(car_key).unwrap();
        assert!(car.transform.position.x.abs() < 0.01);
        assert!(car.transform.position.z.abs() < 0.01);
    }

    #[test]
    fn test_released_turn_keys_leave_residual_spin() {
        let mut world = car_scene().instantiate(None);
        let mut simulation = SimulationSystem::new(&world, Some("car"));

        let mut controller = DriveController::new();
        controller.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        for _ in 0..10 {
            simulation.update(&mut world, &controller);
        }
        controller.process_keyboard(KeyCode::ArrowLeft, ElementState::Released);
        simulation.update(&mut world, &controller);

        let car_key = world.find_by_name("car").unwrap();
        let body_key = world.get_entity(car_key).unwrap().physics_body.unwrap();
        let body = world.physics().unwrap().get_body(body_key).unwrap();
        // The spin survives the release and is left to angular damping
        assert!(
            body.angular_velocity.y > 1.0,
            "expected residual spin, got {:?}",
            body.angular_velocity
        );
    }

    #[test]
    fn test_failed_model_load_keeps_simulation_running() {
        let mut scene = car_scene();
        scene.add_entity(
            EntityTemplate::new(
                MeshSource::Model { path: "/nonexistent/model.ron".to_string() },
                Transform::from_position(Vec3::new(5.0, 1.0, 0.0)),
                Material::BLUE,
            )
            .with_name("prop"),
        );

        let mut world = scene.instantiate(None);
        let mut simulation = SimulationSystem::new(&world, Some("car"));
        assert!(simulation.has_pending_loads());

        let controller = DriveController::new();
        // Give the loader thread time to fail, then keep stepping
        for _ in 0..50 {
            simulation.update(&mut world, &controller);
            std::thread::sleep(std::time::Duration::from_millis(1));
        }

        assert!(!simulation.has_pending_loads());
        let prop_key = world.find_by_name("prop").unwrap();
        assert!(simulation.loaded_model(prop_key).is_none());
    }
}
