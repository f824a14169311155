// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Mesh packing into a single shared vertex/index buffer pair.
//!
//! Every mesh the scene uses is appended to one [`MeshLibrary`]; draw calls
//! then address their mesh through a [`Submesh`] record (index count, first
//! index, base vertex) against the two shared GPU buffers. One buffer bind
//! covers the whole scene.

use std::collections::HashMap;

use super::{MeshData, Vertex};
use crate::error::GeometryError;

/// Draw-call coordinates of one mesh inside the shared buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submesh {
    /// Number of indices the draw consumes.
    pub index_count: u32,
    /// Offset of the first index in the shared index buffer.
    pub start_index: u32,
    /// Added to every index before vertex lookup.
    pub base_vertex: i32,
}

/// A concatenation of meshes sharing one vertex and one index buffer.
///
/// Meshes are registered by name; [`MeshLibrary::submesh`] returns the draw
/// ranges. The packed slices are uploaded to the GPU once and never touched
/// again.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    submeshes: HashMap<String, Submesh>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `mesh` under `name` and records its draw range.
    pub fn add(&mut self, name: &str, mesh: MeshData) -> Result<Submesh, GeometryError> {
        if self.submeshes.contains_key(name) {
            return Err(GeometryError::DuplicateMesh(name.to_owned()));
        }
        if mesh.vertices.is_empty() {
            return Err(GeometryError::MalformedMesh {
                name: name.to_owned(),
                details: "mesh has no vertices".to_owned(),
            });
        }
        if mesh.indices.len() % 3 != 0 {
            return Err(GeometryError::MalformedMesh {
                name: name.to_owned(),
                details: format!("index count {} is not a triangle list", mesh.indices.len()),
            });
        }
        if !mesh.is_well_formed() {
            return Err(GeometryError::MalformedMesh {
                name: name.to_owned(),
                details: "an index references a vertex outside the mesh".to_owned(),
            });
        }

        let submesh = Submesh {
            index_count: mesh.indices.len() as u32,
            start_index: self.indices.len() as u32,
            base_vertex: self.vertices.len() as i32,
        };
        self.vertices.extend_from_slice(&mesh.vertices);
        self.indices.extend_from_slice(&mesh.indices);
        self.submeshes.insert(name.to_owned(), submesh);
        Ok(submesh)
    }

    pub fn submesh(&self, name: &str) -> Option<Submesh> {
        self.submeshes.get(name).copied()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shapes;

    #[test]
    fn test_submeshes_do_not_alias() {
        let mut library = MeshLibrary::new();
        let a = library.add("box", shapes::create_box(1.0, 1.0, 1.0)).unwrap();
        let b = library
            .add("sphere", shapes::create_sphere(0.5, 8, 8))
            .unwrap();
        let c = library.add("grid", shapes::create_grid(10.0, 10.0, 4, 4)).unwrap();

        assert_eq!(a.start_index, 0);
        assert_eq!(a.base_vertex, 0);
        assert_eq!(b.start_index, a.index_count);
        assert_eq!(c.start_index, a.index_count + b.index_count);
        assert!(b.base_vertex > a.base_vertex);
        assert!(c.base_vertex > b.base_vertex);

        // Resolving any packed index against its base vertex must land inside
        // the shared vertex buffer.
        let total = library.vertices().len() as i64;
        for sub in [a, b, c] {
            let range = sub.start_index as usize..(sub.start_index + sub.index_count) as usize;
            for &i in &library.indices()[range] {
                let resolved = i as i64 + sub.base_vertex as i64;
                assert!(resolved >= 0 && resolved < total);
            }
        }
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut library = MeshLibrary::new();
        library.add("box", shapes::create_box(1.0, 1.0, 1.0)).unwrap();
        let err = library.add("box", shapes::create_box(2.0, 2.0, 2.0));
        assert!(matches!(err, Err(GeometryError::DuplicateMesh(_))));
    }

    #[test]
    fn test_malformed_mesh_is_rejected() {
        let mut library = MeshLibrary::new();
        let mut mesh = shapes::create_box(1.0, 1.0, 1.0);
        mesh.indices.push(mesh.vertices.len() as u32); // out of range
        let err = library.add("broken", mesh);
        assert!(matches!(err, Err(GeometryError::MalformedMesh { .. })));
    }

    #[test]
    fn test_lookup_by_name() {
        let mut library = MeshLibrary::new();
        let added = library
            .add("cone", shapes::create_cone(1.0, 1.0, 8, 4))
            .unwrap();
        assert_eq!(library.submesh("cone"), Some(added));
        assert_eq!(library.submesh("missing"), None);
    }
}
