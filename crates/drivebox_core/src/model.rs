//! Model mesh assets
//!
//! Models are stored as RON files describing vertex positions, normals,
//! and triangle indices. Loaded meshes are validated before use so a bad
//! asset degrades to a log line rather than a garbage draw call.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::asset_error::AssetError;

/// Mesh data loaded from a model file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    /// Vertex positions, xyz per vertex
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, one per position
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices into the position/normal arrays
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Load and validate a mesh from a RON model file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.display().to_string())
            } else {
                AssetError::Io(e)
            }
        })?;
        let mesh: MeshData = ron::from_str(&contents)?;
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check that the mesh is drawable
    ///
    /// Validates that the mesh is non-empty, normals match positions,
    /// the index count is a multiple of 3, and every index is in range.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.positions.is_empty() {
            return Err(AssetError::Validation("mesh has no vertices".to_string()));
        }
        if self.normals.len() != self.positions.len() {
            return Err(AssetError::Validation(format!(
                "normal count {} does not match vertex count {}",
                self.normals.len(),
                self.positions.len()
            )));
        }
        if self.indices.is_empty() || self.indices.len() % 3 != 0 {
            return Err(AssetError::Validation(format!(
                "index count {} is not a positive multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.positions.len() as u32;
        if let Some(&bad) = self.indices.iter().find(|&&i| i >= vertex_count) {
            return Err(AssetError::Validation(format!(
                "index {} out of range for {} vertices",
                bad, vertex_count
            )));
        }
        Ok(())
    }

    /// Number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
