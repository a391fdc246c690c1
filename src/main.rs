//! DriveBox - drivable box physics demo
//!
//! Drives the winit event loop: keyboard input steers the car, the mouse
//! orbits the camera, and every frame runs one fixed physics step before
//! rendering.

use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use drivebox::config::AppConfig;
use drivebox::input::{InputAction, InputMapper};
use drivebox::scene::default_scene;
use drivebox::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use drivebox_core::{Scene, Vec3, World};
use drivebox_input::{DriveController, OrbitController};
use drivebox_render::OrbitCamera;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    /// Live world instantiated from the scene file
    world: World,
    simulation: SimulationSystem,
    camera: OrbitCamera,
    drive_controller: DriveController,
    orbit_controller: OrbitController,
    last_frame: Instant,
}

impl App {
    fn new() -> Self {
        // Load configuration
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        // Load the scene file, falling back to the built-in scene
        let scene = match Scene::load(&config.scene.path) {
            Ok(scene) => {
                log::info!("Loaded scene '{}' from {}", scene.name, config.scene.path);
                scene
            }
            Err(e) => {
                log::warn!(
                    "Failed to load scene '{}': {}. Using built-in default scene.",
                    config.scene.path,
                    e
                );
                default_scene()
            }
        };

        // Physics settings from TOML take precedence over the scene's own
        let world = scene.instantiate(Some(config.physics.to_physics_config()));
        log::info!(
            "Scene '{}' instantiated with {} entities",
            scene.name,
            world.entity_count()
        );

        let simulation = SimulationSystem::new(&world, scene.drive_target.as_deref());

        let camera = Self::make_camera(&config);

        let drive_controller = DriveController::new()
            .with_drive_force(config.input.drive_force)
            .with_turn_rate(config.input.turn_rate);

        let orbit_controller = OrbitController::new()
            .with_rotate_sensitivity(config.input.rotate_sensitivity)
            .with_zoom_sensitivity(config.input.zoom_sensitivity)
            .with_smoothing(config.input.smoothing_enabled);

        Self {
            config,
            window_system: None,
            render_system: None,
            world,
            simulation,
            camera,
            drive_controller,
            orbit_controller,
            last_frame: Instant::now(),
        }
    }

    fn make_camera(config: &AppConfig) -> OrbitCamera {
        OrbitCamera::new()
            .with_distance(config.camera.distance)
            .with_fov(config.camera.fov.to_radians())
            .with_clip_planes(config.camera.near, config.camera.far)
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => {
                event_loop.exit();
            }
            InputAction::ResetCamera => {
                let aspect = self.camera.aspect;
                self.camera = Self::make_camera(&self.config);
                self.camera.set_aspect(aspect);
                log::info!("Camera reset to starting view");
            }
            InputAction::ToggleFullscreen => {
                if let Some(ws) = &self.window_system {
                    ws.toggle_fullscreen();
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_none() {
            let window_system = WindowSystem::create(event_loop, &self.config.window)
                .expect("Failed to create window");

            let render_system = RenderSystem::new(
                window_system.window().clone(),
                &self.config.rendering,
                self.config.window.vsync,
            );

            self.camera.set_aspect(render_system.aspect_ratio());

            self.window_system = Some(window_system);
            self.render_system = Some(render_system);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render_system {
                    render.resize(physical_size);
                    self.camera.set_aspect(render.aspect_ratio());
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                        return;
                    }
                    // Driving keys
                    self.drive_controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.orbit_controller.process_mouse_button(button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.orbit_controller.process_scroll(delta);
            }

            WindowEvent::RedrawRequested => {
                // Wall-clock dt drives only camera smoothing; physics always
                // advances by one fixed step per frame
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32().min(0.25);
                self.last_frame = now;

                self.simulation
                    .update(&mut self.world, &self.drive_controller);

                // Camera follows the car
                if let Some(key) = self.simulation.drive_key() {
                    if let Some(entity) = self.world.get_entity(key) {
                        self.camera.target = entity.transform.position
                            + Vec3::new(0.0, self.config.camera.target_height, 0.0);
                    }
                }
                self.orbit_controller.update(&mut self.camera, dt);

                if let Some(render) = &mut self.render_system {
                    render.sync_meshes(&mut self.world, &self.simulation);

                    match render.render_frame(&self.world, &self.camera) {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => {
                            render.reconfigure();
                        }
                        Err(RenderError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => {
                            log::warn!("{}", e);
                        }
                    }
                }

                if let Some(ws) = &self.window_system {
                    if self.config.debug.show_speed_in_title {
                        ws.update_title(self.simulation.drive_speed(&self.world));
                    }
                    ws.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.orbit_controller.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting DriveBox");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
