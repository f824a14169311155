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

//! Defines the interleaved vertex format and the raw mesh container.

use crate::math::{Vec2, Vec3};

/// One interleaved vertex, laid out exactly as the vertex shader consumes it.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tex_coord: tex_coord.to_array(),
        }
    }
}

/// A single generated mesh: an interleaved vertex list plus a triangle-list
/// index buffer.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Checks that every index addresses a vertex of this mesh.
    pub fn is_well_formed(&self) -> bool {
        let count = self.vertices.len() as u32;
        self.indices.iter().all(|&i| i < count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_gpu_compatible() {
        // position (12) + normal (12) + tex_coord (8), no hidden padding.
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn test_well_formed_rejects_stray_index() {
        let mesh = MeshData {
            vertices: vec![Vertex::new(Vec3::ZERO, Vec3::Y, Vec2::ZERO); 3],
            indices: vec![0, 1, 3],
        };
        assert!(!mesh.is_well_formed());
    }
}
