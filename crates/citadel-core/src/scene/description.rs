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

//! Declarative scene tables.
//!
//! A scene is authored as plain data: a list of materials and a list of
//! `{mesh, material, transform}` item records, both referring to each other
//! and to the mesh library by name. [`SceneBuilder`](super::SceneBuilder)
//! turns the table into a live [`Scene`](super::Scene), assigning buffer
//! slots in table order.

use crate::math::{Mat4, Vec3, Vec4};

/// One material definition in a scene table.
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: &'static str,
    pub albedo: Vec4,
    pub fresnel_r0: Vec3,
    pub roughness: f32,
    /// Layer in the diffuse texture array.
    pub diffuse_map_index: u32,
    /// UV transform applied on top of each item's own.
    pub transform: Mat4,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            name: "",
            albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
            fresnel_r0: Vec3::splat(0.01),
            roughness: 0.25,
            diffuse_map_index: 0,
            transform: Mat4::IDENTITY,
        }
    }
}

/// One drawable record in a scene table.
#[derive(Debug, Clone)]
pub struct ItemDesc {
    pub name: &'static str,
    /// Mesh name as registered in the [`MeshLibrary`](crate::geometry::MeshLibrary).
    pub mesh: &'static str,
    /// Material name as defined in the same table.
    pub material: &'static str,
    pub world: Mat4,
    pub tex_transform: Mat4,
}

impl Default for ItemDesc {
    fn default() -> Self {
        Self {
            name: "",
            mesh: "",
            material: "",
            world: Mat4::IDENTITY,
            tex_transform: Mat4::IDENTITY,
        }
    }
}

/// A complete scene, as data.
#[derive(Debug, Clone, Default)]
pub struct SceneDesc {
    pub materials: Vec<MaterialDesc>,
    pub items: Vec<ItemDesc>,
}
