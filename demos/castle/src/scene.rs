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

//! The castle scene, as data.
//!
//! Everything here is a table: the meshes to generate, the materials, and
//! fifty placed items. All layout lives in this file so the rest of the demo
//! only orchestrates the frame loop.

use citadel_core::error::GeometryError;
use citadel_core::frame::LightConstants;
use citadel_core::geometry::{shapes, MeshLibrary};
use citadel_core::math::{radians, Mat4, Vec3, Vec4};
use citadel_core::scene::{ItemDesc, MaterialDesc, SceneDesc};

pub const AMBIENT_LIGHT: [f32; 4] = [0.25, 0.25, 0.35, 1.0];

/// One key light from above-behind plus six colored point lights placed
/// around the courtyard.
pub fn lights() -> Vec<LightConstants> {
    vec![
        LightConstants::directional([0.57735, -0.57735, 0.57735], [0.2, 0.2, 0.2]),
        LightConstants::point([0.0, 3.0, -7.8], [1.0, 1.0, 1.0], 1.0, 10.0),
        LightConstants::point([4.0, 6.0, 0.0], [1.0, 0.0, 0.0], 1.0, 10.0),
        LightConstants::point([-4.0, 6.0, 0.0], [0.0, 1.0, 0.0], 1.0, 10.0),
        LightConstants::point([4.0, 6.0, 8.0], [0.0, 0.0, 1.0], 1.0, 10.0),
        LightConstants::point([-4.0, 6.0, 8.0], [1.0, 1.0, 0.0], 1.0, 10.0),
        LightConstants::point([0.0, 10.0, 6.0], [1.0, 1.0, 1.0], 1.0, 10.0),
    ]
}

/// Generates every mesh the scene refers to and packs them into one shared
/// vertex/index buffer layout.
pub fn build_mesh_library() -> Result<MeshLibrary, GeometryError> {
    let mut library = MeshLibrary::new();
    library.add("box", shapes::create_box(1.5, 0.5, 1.5))?;
    library.add("grid", shapes::create_grid(20.0, 30.0, 60, 40))?;
    library.add("sphere", shapes::create_sphere(0.5, 20, 20))?;
    library.add("cylinder", shapes::create_cylinder(0.5, 0.5, 3.0, 20, 20))?;
    library.add("diamond", shapes::create_diamond(1.0, 1.0))?;
    library.add("wedge", shapes::create_wedge(1.5, 1.5, 1.5))?;
    library.add("octahedron", shapes::create_octahedron(0.5))?;
    library.add("tri_prism", shapes::create_triangular_prism(1.0, 1.0, 1.0))?;
    library.add("hexagon", shapes::create_hexagonal_prism(1.5, 1.5))?;
    library.add("octagon", shapes::create_octagonal_prism(1.5, 1.5))?;
    library.add("cone", shapes::create_cone(1.0, 1.0, 20, 20))?;
    library.add("pyramid", shapes::create_pyramid(1.0, 1.0, 1.0))?;
    library.add("container", shapes::create_hexagonal_container(1.0, 1.0))?;
    library.add("star", shapes::create_star_prism(1.0, 1.0))?;
    Ok(library)
}

fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Translate-then-scale, the placement most items use.
fn place(sx: f32, sy: f32, sz: f32, tx: f32, ty: f32, tz: f32) -> Mat4 {
    translate(tx, ty, tz) * scale(sx, sy, sz)
}

fn item(name: &'static str, mesh: &'static str, material: &'static str, world: Mat4) -> ItemDesc {
    ItemDesc {
        name,
        mesh,
        material,
        world,
        ..ItemDesc::default()
    }
}

/// Builds the full castle table: four materials, fifty items.
pub fn castle_scene() -> SceneDesc {
    let materials = vec![
        MaterialDesc {
            name: "bricks",
            albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
            fresnel_r0: Vec3::splat(0.02),
            roughness: 0.1,
            diffuse_map_index: 0,
            ..MaterialDesc::default()
        },
        MaterialDesc {
            name: "stone",
            albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
            fresnel_r0: Vec3::splat(0.05),
            roughness: 0.3,
            diffuse_map_index: 1,
            ..MaterialDesc::default()
        },
        MaterialDesc {
            name: "tile",
            albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
            fresnel_r0: Vec3::splat(0.02),
            roughness: 0.3,
            diffuse_map_index: 2,
            ..MaterialDesc::default()
        },
        MaterialDesc {
            name: "planks",
            albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
            fresnel_r0: Vec3::splat(0.05),
            roughness: 0.2,
            diffuse_map_index: 3,
            ..MaterialDesc::default()
        },
    ];

    let mut items = Vec::with_capacity(50);

    // Fountain group in front of the gate.
    items.push(item(
        "fountain_base",
        "cylinder",
        "bricks",
        place(4.3, 0.3, 4.3, 0.0, 0.3, -8.0),
    ));
    items.push(item(
        "fountain_basin",
        "container",
        "bricks",
        place(1.3, 1.0, 1.3, 0.0, 1.3, -8.0),
    ));
    items.push(item(
        "obelisk_west",
        "pyramid",
        "stone",
        place(1.0, 1.5, 1.0, -3.5, 0.5, -8.0),
    ));
    items.push(item(
        "obelisk_east",
        "pyramid",
        "stone",
        place(1.0, 1.5, 1.0, 3.5, 0.5, -8.0),
    ));

    // The central keep: box base, hexagonal body, drum, spire.
    items.push(item(
        "keep_spire",
        "cone",
        "stone",
        place(3.0, 2.0, 3.0, 0.0, 7.5, 6.0),
    ));
    items.push(item(
        "keep_drum",
        "cylinder",
        "stone",
        place(5.0, 1.0, 5.0, 0.0, 5.0, 6.0),
    ));
    items.push(item(
        "keep_body",
        "hexagon",
        "stone",
        place(4.5, 2.0, 4.5, 0.0, 2.0, 6.0),
    ));

    items.push(item(
        "gate_roof",
        "tri_prism",
        "tile",
        place(1.5, 1.5, 2.5, 0.0, 0.5, -2.5),
    ));

    // The two gate doors, each a rotated prism swung partly open.
    items.push(item(
        "gate_door_left",
        "tri_prism",
        "tile",
        translate(-1.7, 0.25, -12.0)
            * Mat4::from_rotation_y(radians(-30.0))
            * Mat4::from_rotation_x(radians(-90.0))
            * scale(0.5, 2.0, 0.7),
    ));
    items.push(item(
        "gate_door_right",
        "tri_prism",
        "tile",
        translate(1.5, 0.25, -12.0)
            * Mat4::from_rotation_y(radians(60.0))
            * Mat4::from_rotation_x(radians(-90.0))
            * scale(0.5, 2.0, 0.7),
    ));

    items.push(item(
        "fountain_jewel",
        "diamond",
        "stone",
        place(0.7, 0.5, 0.7, 0.0, 2.0, -8.0),
    ));
    items.push(item(
        "keep_base",
        "box",
        "planks",
        place(4.5, 2.0, 4.5, 0.0, 0.5, 6.0),
    ));

    // The ground plane tiles its texture eight times in each direction.
    items.push(ItemDesc {
        name: "courtyard",
        mesh: "grid",
        material: "stone",
        world: Mat4::IDENTITY,
        tex_transform: scale(8.0, 8.0, 1.0),
    });

    items.push(item(
        "gate_ramp",
        "wedge",
        "stone",
        translate(0.0, 0.35, 2.5) * Mat4::from_rotation_y(radians(-90.0)) * scale(0.3, 0.4, 2.5),
    ));
    items.push(item(
        "gem_east",
        "octahedron",
        "tile",
        translate(3.5, 2.0, -8.0),
    ));
    items.push(item(
        "gem_west",
        "octahedron",
        "tile",
        translate(-3.5, 2.0, -8.0),
    ));

    // Two pairs of wall towers along the flanks, each an octagonal shaft
    // with a sphere finial. Shafts stretch the brick texture vertically.
    // Note the left shaft takes the right-hand placement and vice versa;
    // the transforms are deliberately crossed.
    let brick_stretch = scale(1.0, 3.0, 1.0);
    let tower_names: [[&'static str; 4]; 2] = [
        [
            "tower_shaft_west_front",
            "tower_shaft_east_front",
            "tower_finial_west_front",
            "tower_finial_east_front",
        ],
        [
            "tower_shaft_west_back",
            "tower_shaft_east_back",
            "tower_finial_west_back",
            "tower_finial_east_back",
        ],
    ];
    for (i, names) in tower_names.iter().enumerate() {
        let z = 1.5 + 8.9 * i as f32;
        items.push(ItemDesc {
            name: names[0],
            mesh: "octagon",
            material: "stone",
            world: translate(3.0, 2.0, z) * scale(1.0, 3.0, 1.0),
            tex_transform: brick_stretch,
        });
        items.push(ItemDesc {
            name: names[1],
            mesh: "octagon",
            material: "stone",
            world: translate(-3.0, 2.0, z) * scale(1.0, 3.0, 1.0),
            tex_transform: brick_stretch,
        });
        items.push(item(
            names[2],
            "sphere",
            "stone",
            translate(-3.0, 5.0, z) * scale(1.4, 1.4, 1.4),
        ));
        items.push(item(
            names[3],
            "sphere",
            "stone",
            translate(3.0, 5.0, z) * scale(1.4, 1.4, 1.4),
        ));
    }

    // Perimeter pillars: hexagonal posts capped with cones.
    let pillar_names: [[&'static str; 4]; 2] = [
        [
            "pillar_west_front",
            "pillar_east_front",
            "pillar_cap_west_front",
            "pillar_cap_east_front",
        ],
        [
            "pillar_west_back",
            "pillar_east_back",
            "pillar_cap_west_back",
            "pillar_cap_east_back",
        ],
    ];
    for (i, names) in pillar_names.iter().enumerate() {
        let z = 0.5 + 12.0 * i as f32;
        items.push(ItemDesc {
            name: names[0],
            mesh: "hexagon",
            material: "planks",
            world: place(0.5, 1.2, 0.5, -7.0, 0.6, z),
            tex_transform: brick_stretch,
        });
        items.push(ItemDesc {
            name: names[1],
            mesh: "hexagon",
            material: "planks",
            world: place(0.5, 1.2, 0.5, 7.0, 0.6, z),
            tex_transform: brick_stretch,
        });
        items.push(item(
            names[2],
            "cone",
            "planks",
            place(0.7, 0.7, 0.7, -7.0, 1.6, z),
        ));
        items.push(item(
            names[3],
            "cone",
            "planks",
            place(0.7, 0.7, 0.7, 7.0, 1.6, z),
        ));
    }

    // Ramps up onto the keep base.
    items.push(item(
        "keep_ramp_west",
        "wedge",
        "planks",
        place(0.3, 0.4, 4.0, -3.65, 0.35, 6.0),
    ));
    items.push(item(
        "keep_ramp_east",
        "wedge",
        "planks",
        translate(3.65, 0.35, 6.0) * Mat4::from_rotation_y(radians(180.0)) * scale(0.3, 0.4, 4.0),
    ));
    items.push(item(
        "keep_ramp_back",
        "wedge",
        "planks",
        translate(0.0, 0.35, 9.6) * Mat4::from_rotation_y(radians(90.0)) * scale(0.3, 0.4, 2.5),
    ));

    // Banner pole and star on top of the spire.
    items.push(item(
        "banner_pole",
        "cylinder",
        "planks",
        place(0.2, 1.0, 0.2, 0.0, 8.3, 6.0),
    ));
    items.push(item(
        "banner_star",
        "star",
        "planks",
        place(0.6, 1.0, 0.6, 0.0, 9.5, 6.0),
    ));

    // Curtain walls. The long runs first, then the shorter segments that
    // frame the gate and the fountain court, mirrored per side.
    items.push(item(
        "wall_west",
        "box",
        "planks",
        place(0.2, 2.6, 8.0, -7.0, 0.5, 6.5),
    ));
    items.push(item(
        "wall_back",
        "box",
        "planks",
        translate(0.0, 0.5, 12.5) * Mat4::from_rotation_y(radians(90.0)) * scale(0.2, 2.6, 9.0),
    ));
    items.push(item(
        "wall_east",
        "box",
        "planks",
        place(0.2, 2.6, 8.0, 7.0, 0.5, 6.5),
    ));

    let segment_names: [[&'static str; 5]; 2] = [
        [
            "wall_front_west",
            "wall_court_north_west",
            "wall_court_side_west",
            "wall_court_south_west",
            "wall_gate_west",
        ],
        [
            "wall_front_east",
            "wall_court_north_east",
            "wall_court_side_east",
            "wall_court_south_east",
            "wall_gate_east",
        ],
    ];
    for (i, names) in segment_names.iter().enumerate() {
        let side = i as f32;
        items.push(item(
            names[0],
            "box",
            "planks",
            translate(-5.0 + 10.0 * side, 0.5, 0.5)
                * Mat4::from_rotation_y(radians(90.0))
                * scale(0.2, 2.6, 3.0),
        ));
        items.push(item(
            names[1],
            "box",
            "planks",
            translate(-4.0 + 8.0 * side, 0.5, -5.5)
                * Mat4::from_rotation_y(radians(90.0))
                * scale(0.2, 2.6, 2.0),
        ));
        items.push(item(
            names[2],
            "box",
            "planks",
            place(0.2, 2.6, 4.0, -5.35 + 10.7 * side, 0.5, -8.5),
        ));
        items.push(item(
            names[3],
            "box",
            "planks",
            translate(-4.0 + 8.0 * side, 0.5, -11.5)
                * Mat4::from_rotation_y(radians(90.0))
                * scale(0.2, 2.6, 2.0),
        ));
        items.push(item(
            names[4],
            "box",
            "planks",
            place(0.2, 2.6, 4.2, -2.7 + 5.4 * side, 0.5, -2.5),
        ));
    }

    SceneDesc { materials, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citadel_core::frame::MAX_LIGHTS;
    use citadel_core::scene::SceneBuilder;

    #[test]
    fn test_scene_table_builds() {
        let library = build_mesh_library().unwrap();
        let scene = SceneBuilder::build(&castle_scene(), &library).unwrap();
        assert_eq!(scene.materials().len(), 4);
        assert_eq!(scene.items().len(), 50);
    }

    #[test]
    fn test_item_names_are_unique() {
        let desc = castle_scene();
        let mut names: Vec<&str> = desc.items.iter().map(|i| i.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), desc.items.len());
    }

    #[test]
    fn test_every_item_references_known_names() {
        let library = build_mesh_library().unwrap();
        let desc = castle_scene();
        for item in &desc.items {
            assert!(library.submesh(item.mesh).is_some(), "{}", item.mesh);
            assert!(
                desc.materials.iter().any(|m| m.name == item.material),
                "{}",
                item.material
            );
        }
    }

    #[test]
    fn test_light_count_fits_pass_constants() {
        assert!(lights().len() <= MAX_LIGHTS);
    }

    #[test]
    fn test_tower_shafts_are_crossed() {
        let desc = castle_scene();
        let west = desc
            .items
            .iter()
            .find(|i| i.name == "tower_shaft_west_front")
            .unwrap();
        let east = desc
            .items
            .iter()
            .find(|i| i.name == "tower_shaft_east_front")
            .unwrap();
        // West shaft sits at +X, east at -X.
        assert!(west.world.to_cols_array_2d()[3][0] > 0.0);
        assert!(east.world.to_cols_array_2d()[3][0] < 0.0);
    }
}
