//! Render system
//!
//! Owns the GPU context, the mesh pipeline, and one GPU mesh per entity.
//! Geometry uploads happen only when an entity's mesh changes; transforms
//! and tints are re-uploaded every frame.

use std::collections::HashMap;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use drivebox_core::{DirtyFlags, EntityKey, World};
use drivebox_render::{
    build_mesh, GlobalUniforms, GpuMesh, MeshPipeline, ModelUniforms, OrbitCamera, RenderContext,
};

use crate::config::RenderingConfig;
use crate::systems::SimulationSystem;

/// Errors that can occur while rendering a frame
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost or outdated; reconfigure and retry next frame
    SurfaceLost,
    /// GPU ran out of memory; fatal
    OutOfMemory,
    /// Other surface error; skip this frame
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Render surface lost"),
            RenderError::OutOfMemory => write!(f, "GPU out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Draws the world each frame
pub struct RenderSystem {
    context: RenderContext,
    pipeline: MeshPipeline,
    /// GPU mesh per entity, rebuilt when the entity's mesh is dirty
    meshes: HashMap<EntityKey, GpuMesh>,
    background: wgpu::Color,
    light_dir: [f32; 3],
    ambient_strength: f32,
    diffuse_strength: f32,
}

impl RenderSystem {
    /// Create the render system for a window
    ///
    /// Blocks on GPU adapter and device acquisition.
    pub fn new(window: Arc<Window>, rendering: &RenderingConfig, vsync: bool) -> Self {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync));

        let mut pipeline = MeshPipeline::new(&context.device, context.config.format);
        pipeline.ensure_depth_texture(&context.device, context.size.width, context.size.height);

        let bg = rendering.background_color;
        Self {
            context,
            pipeline,
            meshes: HashMap::new(),
            background: wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
            light_dir: rendering.light_dir,
            ambient_strength: rendering.ambient_strength,
            diffuse_strength: rendering.diffuse_strength,
        }
    }

    /// Resize the surface and depth buffer
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
        self.pipeline
            .ensure_depth_texture(&self.context.device, new_size.width, new_size.height);
    }

    /// Reconfigure the surface at its current size (after a lost surface)
    pub fn reconfigure(&mut self) {
        let size = self.context.size;
        self.context.resize(size);
    }

    /// Current surface aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }

    /// Upload GPU meshes for new or mesh-dirty entities
    ///
    /// Entities whose model finished loading get their placeholder box
    /// replaced here.
    pub fn sync_meshes(&mut self, world: &mut World, simulation: &SimulationSystem) {
        // Drop GPU meshes for entities that no longer exist
        self.meshes.retain(|key, _| world.get_entity(*key).is_some());

        let mut rebuild = Vec::new();
        for (key, entity) in world.iter_with_keys() {
            if !self.meshes.contains_key(&key)
                || entity.dirty_flags().contains(DirtyFlags::MESH)
            {
                rebuild.push(key);
            }
        }

        for key in rebuild {
            let Some(entity) = world.get_entity(key) else { continue };
            let buffers = build_mesh(&entity.mesh, simulation.loaded_model(key));
            let mesh = self.pipeline.create_mesh(&self.context.device, &buffers);
            self.meshes.insert(key, mesh);
            if let Some(entity) = world.get_entity_mut(key) {
                entity.clear_dirty();
            }
        }
    }

    /// Render one frame
    pub fn render_frame(
        &mut self,
        world: &World,
        camera: &OrbitCamera,
    ) -> Result<(), RenderError> {
        let globals = GlobalUniforms {
            view_matrix: camera.view_matrix(),
            projection_matrix: camera.projection_matrix(),
            light_dir: self.light_dir,
            _padding: 0.0,
            ambient_strength: self.ambient_strength,
            diffuse_strength: self.diffuse_strength,
            _padding2: [0.0; 2],
        };
        self.pipeline.update_globals(&self.context.queue, &globals);

        // Per-entity uniforms reflect the transform the physics sync wrote
        let mut draw_list: Vec<&GpuMesh> = Vec::with_capacity(self.meshes.len());
        for (key, entity) in world.iter_with_keys() {
            if let Some(mesh) = self.meshes.get(&key) {
                let uniforms = ModelUniforms {
                    model_matrix: entity.transform.to_matrix(),
                    tint: entity.material.base_color,
                };
                self.pipeline.update_model(&self.context.queue, mesh, &uniforms);
                draw_list.push(mesh);
            }
        }

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(RenderError::OutOfMemory);
            }
            Err(e) => {
                return Err(RenderError::Other(format!("{:?}", e)));
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline
            .render(&mut encoder, &view, &draw_list, self.background);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
