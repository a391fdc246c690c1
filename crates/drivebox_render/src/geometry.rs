//! CPU-side mesh building
//!
//! Builds vertex/index data for the demo's primitives and for loaded model
//! assets. Boxes use flat face normals, so each face gets its own four
//! vertices.

use drivebox_core::{MeshData, MeshSource};
use drivebox_math::Vec3;

use crate::pipeline::Vertex;

/// A mesh ready for upload to GPU buffers
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Build mesh buffers for a mesh source
///
/// `Model` sources take their geometry from `loaded`, which is the mesh the
/// background loader produced for that entity (None while still loading or
/// after a failed load; a unit box stands in so the entity stays visible).
pub fn build_mesh(source: &MeshSource, loaded: Option<&MeshData>) -> MeshBuffers {
    match source {
        MeshSource::Box { half_extents } => box_mesh(*half_extents),
        MeshSource::Ground { half_size } => ground_mesh(*half_size, 20),
        MeshSource::Model { .. } => match loaded {
            Some(data) => model_mesh(data),
            None => box_mesh(Vec3::splat(0.5)),
        },
    }
}

/// An axis-aligned box with flat face normals
pub fn box_mesh(half_extents: Vec3) -> MeshBuffers {
    let Vec3 { x, y, z } = half_extents;
    let white = [1.0, 1.0, 1.0, 1.0];

    // Four corners per face, counterclockwise seen from outside
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +X
        (
            [1.0, 0.0, 0.0],
            [[x, -y, -z], [x, y, -z], [x, y, z], [x, -y, z]],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [[-x, -y, z], [-x, y, z], [-x, y, -z], [-x, -y, -z]],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [[-x, y, -z], [-x, y, z], [x, y, z], [x, y, -z]],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [[-x, -y, z], [-x, -y, -z], [x, -y, -z], [x, -y, z]],
        ),
        // +Z
        (
            [0.0, 0.0, 1.0],
            [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]],
        ),
        // -Z
        (
            [0.0, 0.0, -1.0],
            [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for corner in corners {
            vertices.push(Vertex::new(corner, normal, white));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshBuffers { vertices, indices }
}

/// A flat ground plane with a checkered tint baked into the vertex colors
///
/// The plane spans `half_size` units from the origin in X and Z, split into
/// `divisions` x `divisions` tiles so alternating tiles can differ in shade.
pub fn ground_mesh(half_size: f32, divisions: u32) -> MeshBuffers {
    let divisions = divisions.max(1);
    let tile = (half_size * 2.0) / divisions as f32;
    let normal = [0.0, 1.0, 0.0];

    let mut vertices = Vec::with_capacity((divisions * divisions * 4) as usize);
    let mut indices = Vec::with_capacity((divisions * divisions * 6) as usize);

    for row in 0..divisions {
        for col in 0..divisions {
            let x0 = -half_size + col as f32 * tile;
            let z0 = -half_size + row as f32 * tile;
            let x1 = x0 + tile;
            let z1 = z0 + tile;

            let shade = if (row + col) % 2 == 0 { 1.0 } else { 0.8 };
            let color = [shade, shade, shade, 1.0];

            let base = vertices.len() as u32;
            vertices.push(Vertex::new([x0, 0.0, z0], normal, color));
            vertices.push(Vertex::new([x0, 0.0, z1], normal, color));
            vertices.push(Vertex::new([x1, 0.0, z1], normal, color));
            vertices.push(Vertex::new([x1, 0.0, z0], normal, color));
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    MeshBuffers { vertices, indices }
}

/// Convert a loaded model asset into mesh buffers
pub fn model_mesh(data: &MeshData) -> MeshBuffers {
    let white = [1.0, 1.0, 1.0, 1.0];
    let vertices = data
        .positions
        .iter()
        .zip(&data.normals)
        .map(|(&position, &normal)| Vertex::new(position, normal, white))
        .collect();

    MeshBuffers {
        vertices,
        indices: data.indices.clone(),
    }
}
