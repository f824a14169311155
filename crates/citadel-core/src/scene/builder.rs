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

use std::collections::HashMap;

use super::description::SceneDesc;
use super::item::RenderItem;
use super::material::Material;
use super::Scene;
use crate::error::SceneError;
use crate::geometry::MeshLibrary;

/// Turns a [`SceneDesc`] table into a live [`Scene`].
///
/// Materials get consecutive slots in table order; items likewise. Every
/// name reference is validated up front so a typo in the table fails scene
/// construction instead of drawing garbage.
pub struct SceneBuilder;

impl SceneBuilder {
    pub fn build(desc: &SceneDesc, library: &MeshLibrary) -> Result<Scene, SceneError> {
        let mut materials = Vec::with_capacity(desc.materials.len());
        let mut material_slots = HashMap::new();

        for (slot, mat) in desc.materials.iter().enumerate() {
            if material_slots.insert(mat.name, slot).is_some() {
                return Err(SceneError::DuplicateMaterial(mat.name.to_owned()));
            }
            materials.push(Material::new(
                mat.name,
                slot,
                mat.albedo,
                mat.fresnel_r0,
                mat.roughness,
                mat.transform,
                mat.diffuse_map_index,
            ));
        }

        let mut items = Vec::with_capacity(desc.items.len());
        for (slot, item) in desc.items.iter().enumerate() {
            let submesh = library
                .submesh(item.mesh)
                .ok_or_else(|| SceneError::UnknownMesh {
                    item: item.name.to_owned(),
                    mesh: item.mesh.to_owned(),
                })?;
            let material_slot =
                *material_slots
                    .get(item.material)
                    .ok_or_else(|| SceneError::UnknownMaterial {
                        item: item.name.to_owned(),
                        material: item.material.to_owned(),
                    })?;
            items.push(RenderItem::new(
                item.name,
                item.world,
                item.tex_transform,
                submesh,
                slot,
                material_slot as u32,
            ));
        }

        log::debug!(
            "Scene built: {} items, {} materials",
            items.len(),
            materials.len()
        );
        Ok(Scene { materials, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shapes;
    use crate::scene::description::{ItemDesc, MaterialDesc};

    fn library() -> MeshLibrary {
        let mut library = MeshLibrary::new();
        library
            .add("box", shapes::create_box(1.0, 1.0, 1.0))
            .unwrap();
        library
            .add("sphere", shapes::create_sphere(0.5, 8, 8))
            .unwrap();
        library
    }

    #[test]
    fn test_slots_follow_table_order() {
        let desc = SceneDesc {
            materials: vec![
                MaterialDesc {
                    name: "bricks",
                    ..Default::default()
                },
                MaterialDesc {
                    name: "stone",
                    ..Default::default()
                },
            ],
            items: vec![
                ItemDesc {
                    name: "a",
                    mesh: "box",
                    material: "stone",
                    ..Default::default()
                },
                ItemDesc {
                    name: "b",
                    mesh: "sphere",
                    material: "bricks",
                    ..Default::default()
                },
            ],
        };
        let scene = SceneBuilder::build(&desc, &library()).unwrap();

        assert_eq!(scene.materials()[0].slot(), 0);
        assert_eq!(scene.materials()[1].slot(), 1);
        assert_eq!(scene.items()[0].object_slot(), 0);
        assert_eq!(scene.items()[0].material_slot(), 1);
        assert_eq!(scene.items()[1].object_slot(), 1);
        assert_eq!(scene.items()[1].material_slot(), 0);
    }

    #[test]
    fn test_unknown_mesh_fails() {
        let desc = SceneDesc {
            materials: vec![MaterialDesc {
                name: "stone",
                ..Default::default()
            }],
            items: vec![ItemDesc {
                name: "a",
                mesh: "teapot",
                material: "stone",
                ..Default::default()
            }],
        };
        let err = SceneBuilder::build(&desc, &library()).unwrap_err();
        assert!(matches!(err, SceneError::UnknownMesh { .. }));
    }

    #[test]
    fn test_unknown_material_fails() {
        let desc = SceneDesc {
            items: vec![ItemDesc {
                name: "a",
                mesh: "box",
                material: "gold",
                ..Default::default()
            }],
            ..Default::default()
        };
        let err = SceneBuilder::build(&desc, &library()).unwrap_err();
        assert!(matches!(err, SceneError::UnknownMaterial { .. }));
    }

    #[test]
    fn test_duplicate_material_fails() {
        let desc = SceneDesc {
            materials: vec![
                MaterialDesc {
                    name: "stone",
                    ..Default::default()
                },
                MaterialDesc {
                    name: "stone",
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let err = SceneBuilder::build(&desc, &library()).unwrap_err();
        assert_eq!(err, SceneError::DuplicateMaterial("stone".to_owned()));
    }
}
