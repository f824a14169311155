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

//! Procedural shape generators.
//!
//! Smooth shapes (grid, sphere, cylinder, cone) carry analytic normals and
//! cylindrical/planar texture coordinates. The faceted family (pyramid,
//! wedge, diamond, prisms, star, container) is authored as positions plus a
//! triangle list and run through [`flat_shaded`], which duplicates vertices
//! per face and derives planar texture coordinates in the face's own plane.
//!
//! Shapes are centered on the origin unless noted; the grid lies in the XZ
//! plane at `y = 0`.

use super::{MeshData, Vertex};
use crate::math::{Vec2, Vec3, PI};

/// Builds a flat-shaded mesh from shared positions and a triangle list.
///
/// Each triangle gets its own three vertices with the face normal, so edges
/// stay crisp. Texture coordinates are the vertex positions projected into
/// the face plane, in world units, which wraps tileable textures without
/// visible stretching.
fn flat_shaded(positions: &[Vec3], triangles: &[[usize; 3]]) -> MeshData {
    let mut mesh = MeshData::default();

    for tri in triangles {
        let [p0, p1, p2] = [positions[tri[0]], positions[tri[1]], positions[tri[2]]];
        let normal = (p1 - p0).cross(p2 - p0).normalize();

        let tangent = (p1 - p0).normalize();
        let bitangent = normal.cross(tangent);

        let base = mesh.vertices.len() as u32;
        for p in [p0, p1, p2] {
            let rel = p - p0;
            let uv = Vec2::new(rel.dot(tangent), rel.dot(bitangent));
            mesh.vertices.push(Vertex::new(p, normal, uv));
        }
        mesh.indices.extend([base, base + 1, base + 2]);
    }

    mesh
}

/// Pushes the two triangles of a quad `(a, b, c, d)` given in winding order.
fn quad(triangles: &mut Vec<[usize; 3]>, a: usize, b: usize, c: usize, d: usize) {
    triangles.push([a, b, c]);
    triangles.push([a, c, d]);
}

/// An axis-aligned box centered on the origin.
pub fn create_box(width: f32, height: f32, depth: f32) -> MeshData {
    let (w, h, d) = (width * 0.5, height * 0.5, depth * 0.5);

    // Six faces, four vertices each, with per-face normals and unit UVs.
    #[rustfmt::skip]
    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (-Z out of the screen in the left-handed scene).
        ([Vec3::new(-w, -h, -d), Vec3::new(-w, h, -d), Vec3::new(w, h, -d), Vec3::new(w, -h, -d)], Vec3::new(0.0, 0.0, -1.0)),
        // Back.
        ([Vec3::new(w, -h, d), Vec3::new(w, h, d), Vec3::new(-w, h, d), Vec3::new(-w, -h, d)], Vec3::new(0.0, 0.0, 1.0)),
        // Top.
        ([Vec3::new(-w, h, -d), Vec3::new(-w, h, d), Vec3::new(w, h, d), Vec3::new(w, h, -d)], Vec3::new(0.0, 1.0, 0.0)),
        // Bottom.
        ([Vec3::new(-w, -h, d), Vec3::new(-w, -h, -d), Vec3::new(w, -h, -d), Vec3::new(w, -h, d)], Vec3::new(0.0, -1.0, 0.0)),
        // Left.
        ([Vec3::new(-w, -h, d), Vec3::new(-w, h, d), Vec3::new(-w, h, -d), Vec3::new(-w, -h, -d)], Vec3::new(-1.0, 0.0, 0.0)),
        // Right.
        ([Vec3::new(w, -h, -d), Vec3::new(w, h, -d), Vec3::new(w, h, d), Vec3::new(w, -h, d)], Vec3::new(1.0, 0.0, 0.0)),
    ];

    let uvs = [
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
    ];

    let mut mesh = MeshData::default();
    for (corners, normal) in faces {
        let base = mesh.vertices.len() as u32;
        for (corner, uv) in corners.into_iter().zip(uvs) {
            mesh.vertices.push(Vertex::new(corner, normal, uv));
        }
        mesh.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// An `m` x `n` vertex grid in the XZ plane at `y = 0`, normal up.
pub fn create_grid(width: f32, depth: f32, m: u32, n: u32) -> MeshData {
    debug_assert!(m >= 2 && n >= 2);
    let half_w = width * 0.5;
    let half_d = depth * 0.5;
    let dx = width / (n - 1) as f32;
    let dz = depth / (m - 1) as f32;
    let du = 1.0 / (n - 1) as f32;
    let dv = 1.0 / (m - 1) as f32;

    let mut mesh = MeshData::default();
    for i in 0..m {
        let z = half_d - i as f32 * dz;
        for j in 0..n {
            let x = -half_w + j as f32 * dx;
            mesh.vertices.push(Vertex::new(
                Vec3::new(x, 0.0, z),
                Vec3::Y,
                Vec2::new(j as f32 * du, i as f32 * dv),
            ));
        }
    }

    for i in 0..m - 1 {
        for j in 0..n - 1 {
            let row = i * n + j;
            let next = (i + 1) * n + j;
            mesh.indices
                .extend([row, row + 1, next, next, row + 1, next + 1]);
        }
    }
    mesh
}

/// A UV sphere with poles on the Y axis.
pub fn create_sphere(radius: f32, slice_count: u32, stack_count: u32) -> MeshData {
    debug_assert!(slice_count >= 3 && stack_count >= 2);
    let mut mesh = MeshData::default();

    mesh.vertices
        .push(Vertex::new(Vec3::new(0.0, radius, 0.0), Vec3::Y, Vec2::ZERO));

    let phi_step = PI / stack_count as f32;
    let theta_step = 2.0 * PI / slice_count as f32;

    // Interior stacks (poles excluded).
    for i in 1..stack_count {
        let phi = i as f32 * phi_step;
        for j in 0..=slice_count {
            let theta = j as f32 * theta_step;
            let position = Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            );
            mesh.vertices.push(Vertex::new(
                position,
                position.normalize(),
                Vec2::new(theta / (2.0 * PI), phi / PI),
            ));
        }
    }

    mesh.vertices.push(Vertex::new(
        Vec3::new(0.0, -radius, 0.0),
        -Vec3::Y,
        Vec2::new(0.0, 1.0),
    ));

    // Top cap.
    for j in 1..=slice_count {
        mesh.indices.extend([0, j + 1, j]);
    }

    // Interior quads.
    let ring = slice_count + 1;
    let mut base = 1u32;
    for _ in 0..stack_count - 2 {
        for j in 0..slice_count {
            mesh.indices.extend([
                base + j,
                base + j + 1,
                base + ring + j,
                base + ring + j,
                base + j + 1,
                base + ring + j + 1,
            ]);
        }
        base += ring;
    }

    // Bottom cap.
    let south = mesh.vertices.len() as u32 - 1;
    let last_ring = south - ring;
    for j in 0..slice_count {
        mesh.indices.extend([south, last_ring + j, last_ring + j + 1]);
    }

    mesh
}

/// A capped cylinder (or truncated cone) centered on the origin.
pub fn create_cylinder(
    bottom_radius: f32,
    top_radius: f32,
    height: f32,
    slice_count: u32,
    stack_count: u32,
) -> MeshData {
    debug_assert!(slice_count >= 3 && stack_count >= 1);
    let mut mesh = MeshData::default();

    let stack_height = height / stack_count as f32;
    let radius_step = (top_radius - bottom_radius) / stack_count as f32;
    let theta_step = 2.0 * PI / slice_count as f32;

    // Side rings, bottom to top. The slope term keeps normals correct for
    // cones as well as straight cylinders.
    let dr = bottom_radius - top_radius;
    for i in 0..=stack_count {
        let y = -0.5 * height + i as f32 * stack_height;
        let r = bottom_radius + i as f32 * radius_step;
        for j in 0..=slice_count {
            let theta = j as f32 * theta_step;
            let (s, c) = theta.sin_cos();
            let normal = Vec3::new(c, dr / height, s).normalize();
            mesh.vertices.push(Vertex::new(
                Vec3::new(r * c, y, r * s),
                normal,
                Vec2::new(j as f32 / slice_count as f32, 1.0 - i as f32 / stack_count as f32),
            ));
        }
    }

    let ring = slice_count + 1;
    for i in 0..stack_count {
        for j in 0..slice_count {
            let a = i * ring + j;
            let b = (i + 1) * ring + j;
            mesh.indices.extend([a, b, b + 1, a, b + 1, a + 1]);
        }
    }

    build_cylinder_cap(&mut mesh, top_radius, height * 0.5, slice_count, true);
    build_cylinder_cap(&mut mesh, bottom_radius, -height * 0.5, slice_count, false);

    mesh
}

fn build_cylinder_cap(mesh: &mut MeshData, radius: f32, y: f32, slice_count: u32, top: bool) {
    if radius <= 0.0 {
        return;
    }
    let base = mesh.vertices.len() as u32;
    let theta_step = 2.0 * PI / slice_count as f32;
    let normal = if top { Vec3::Y } else { -Vec3::Y };

    for j in 0..=slice_count {
        let theta = j as f32 * theta_step;
        let (s, c) = theta.sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(radius * c, y, radius * s),
            normal,
            Vec2::new(c * 0.5 + 0.5, s * 0.5 + 0.5),
        ));
    }
    let center = mesh.vertices.len() as u32;
    mesh.vertices
        .push(Vertex::new(Vec3::new(0.0, y, 0.0), normal, Vec2::new(0.5, 0.5)));

    for j in 0..slice_count {
        if top {
            mesh.indices.extend([center, base + j + 1, base + j]);
        } else {
            mesh.indices.extend([center, base + j, base + j + 1]);
        }
    }
}

/// A cone standing on its base, centered on the origin.
pub fn create_cone(radius: f32, height: f32, slice_count: u32, stack_count: u32) -> MeshData {
    create_cylinder(radius, 0.0, height, slice_count, stack_count)
}

/// A four-sided pyramid centered on the origin, apex up.
pub fn create_pyramid(width: f32, depth: f32, height: f32) -> MeshData {
    let (w, d, h) = (width * 0.5, depth * 0.5, height * 0.5);
    let positions = [
        Vec3::new(-w, -h, -d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, -h, d),
        Vec3::new(-w, -h, d),
        Vec3::new(0.0, h, 0.0), // apex
    ];
    let mut triangles = vec![[0, 4, 1], [1, 4, 2], [2, 4, 3], [3, 4, 0]];
    quad(&mut triangles, 0, 1, 2, 3); // base, facing down
    flat_shaded(&positions, &triangles)
}

/// A ramp: a box sliced diagonally, with the high edge at `-X`.
pub fn create_wedge(width: f32, height: f32, depth: f32) -> MeshData {
    let (w, h, d) = (width * 0.5, height * 0.5, depth * 0.5);
    let positions = [
        Vec3::new(-w, -h, -d), // 0 low near
        Vec3::new(w, -h, -d),  // 1
        Vec3::new(w, -h, d),   // 2
        Vec3::new(-w, -h, d),  // 3
        Vec3::new(-w, h, -d),  // 4 high near
        Vec3::new(-w, h, d),   // 5 high far
    ];
    let mut triangles = vec![[0, 4, 1], [3, 2, 5]]; // triangular ends
    quad(&mut triangles, 1, 4, 5, 2); // slope
    quad(&mut triangles, 0, 3, 5, 4); // tall back face
    quad(&mut triangles, 0, 1, 2, 3); // bottom
    flat_shaded(&positions, &triangles)
}

/// A bipyramid: two four-sided pyramids joined at a square equator.
pub fn create_diamond(width: f32, height: f32) -> MeshData {
    let (w, h) = (width * 0.5, height * 0.5);
    let positions = [
        Vec3::new(0.0, h, 0.0),  // 0 apex
        Vec3::new(-w, 0.0, 0.0), // equator
        Vec3::new(0.0, 0.0, -w),
        Vec3::new(w, 0.0, 0.0),
        Vec3::new(0.0, 0.0, w),
        Vec3::new(0.0, -h, 0.0), // 5 bottom apex
    ];
    let triangles = [
        [0, 2, 1],
        [0, 3, 2],
        [0, 4, 3],
        [0, 1, 4],
        [5, 1, 2],
        [5, 2, 3],
        [5, 3, 4],
        [5, 4, 1],
    ];
    flat_shaded(&positions, &triangles)
}

/// A regular octahedron: vertices on every axis at `radius`.
pub fn create_octahedron(radius: f32) -> MeshData {
    create_diamond(radius * 2.0, radius * 2.0)
}

/// A prism with an isosceles-triangle cross section, extruded along Z.
pub fn create_triangular_prism(width: f32, height: f32, depth: f32) -> MeshData {
    let (w, h, d) = (width * 0.5, height * 0.5, depth * 0.5);
    let positions = [
        Vec3::new(-w, -h, -d), // 0
        Vec3::new(w, -h, -d),  // 1
        Vec3::new(0.0, h, -d), // 2 ridge near
        Vec3::new(-w, -h, d),  // 3
        Vec3::new(w, -h, d),   // 4
        Vec3::new(0.0, h, d),  // 5 ridge far
    ];
    let mut triangles = vec![[0, 2, 1], [3, 4, 5]]; // ends
    quad(&mut triangles, 0, 3, 5, 2); // left slope
    quad(&mut triangles, 1, 2, 5, 4); // right slope
    quad(&mut triangles, 0, 1, 4, 3); // bottom
    flat_shaded(&positions, &triangles)
}

/// Points of a regular `sides`-gon of the given radius in the XZ plane.
fn polygon_ring(sides: u32, radius: f32, y: f32) -> Vec<Vec3> {
    (0..sides)
        .map(|i| {
            let theta = 2.0 * PI * i as f32 / sides as f32;
            Vec3::new(radius * theta.cos(), y, radius * theta.sin())
        })
        .collect()
}

/// A solid regular prism (hexagon, octagon, ...) extruded along Y.
pub fn create_regular_prism(sides: u32, radius: f32, height: f32) -> MeshData {
    debug_assert!(sides >= 3);
    let h = height * 0.5;
    let n = sides as usize;

    let mut positions = polygon_ring(sides, radius, -h);
    positions.extend(polygon_ring(sides, radius, h));
    positions.push(Vec3::new(0.0, -h, 0.0)); // 2n: bottom center
    positions.push(Vec3::new(0.0, h, 0.0)); // 2n+1: top center

    let mut triangles = Vec::new();
    for i in 0..n {
        let j = (i + 1) % n;
        quad(&mut triangles, j, i, n + i, n + j); // wall, facing outward
        triangles.push([2 * n, i, j]); // bottom fan
        triangles.push([2 * n + 1, n + j, n + i]); // top fan
    }
    flat_shaded(&positions, &triangles)
}

/// A six-sided prism. The castle keep's walls and tower bases use this.
pub fn create_hexagonal_prism(radius: f32, height: f32) -> MeshData {
    create_regular_prism(6, radius, height)
}

/// An eight-sided prism, used for the gate towers.
pub fn create_octagonal_prism(radius: f32, height: f32) -> MeshData {
    create_regular_prism(8, radius, height)
}

/// An open hexagonal vessel: outer and inner walls, a floor, and a flat rim.
/// The fountain basin uses this.
pub fn create_hexagonal_container(radius: f32, height: f32) -> MeshData {
    let sides = 6usize;
    let h = height * 0.5;
    let inner = radius * 0.8;

    let mut positions = polygon_ring(6, radius, -h); // 0..6   outer bottom
    positions.extend(polygon_ring(6, radius, h)); // 6..12  outer top
    positions.extend(polygon_ring(6, inner, -h * 0.6)); // 12..18 inner floor
    positions.extend(polygon_ring(6, inner, h)); // 18..24 inner top
    positions.push(Vec3::new(0.0, -h, 0.0)); // 24 bottom center
    positions.push(Vec3::new(0.0, -h * 0.6, 0.0)); // 25 floor center

    let mut triangles = Vec::new();
    for i in 0..sides {
        let j = (i + 1) % sides;
        quad(&mut triangles, j, i, 6 + i, 6 + j); // outer wall, facing out
        quad(&mut triangles, 12 + i, 12 + j, 18 + j, 18 + i); // inner wall, facing in
        quad(&mut triangles, 18 + i, 18 + j, 6 + j, 6 + i); // rim, facing up
        triangles.push([24, i, j]); // underside
        triangles.push([25, 12 + j, 12 + i]); // floor, facing up
    }
    flat_shaded(&positions, &triangles)
}

/// A five-pointed star extruded along Y, for the banner atop the keep.
pub fn create_star_prism(radius: f32, height: f32) -> MeshData {
    let points = 5usize;
    let rim = 2 * points; // 10 outline points, alternating outer/inner
    let h = height * 0.5;
    let inner = radius * 0.5;

    let outline: Vec<Vec2> = (0..rim)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { inner };
            // Start at the top point and walk clockwise.
            let theta = PI / 2.0 - 2.0 * PI * i as f32 / rim as f32;
            Vec2::new(r * theta.cos(), r * theta.sin())
        })
        .collect();

    let mut positions: Vec<Vec3> = outline
        .iter()
        .map(|p| Vec3::new(p.x, -h, p.y))
        .collect();
    positions.extend(outline.iter().map(|p| Vec3::new(p.x, h, p.y)));
    positions.push(Vec3::new(0.0, -h, 0.0)); // 2*rim: bottom center
    positions.push(Vec3::new(0.0, h, 0.0)); // 2*rim+1: top center

    // The center sees every outline point, so a fan triangulates the
    // non-convex caps correctly.
    // The outline walks clockwise, so winding is mirrored relative to the
    // counter-clockwise polygon rings above.
    let mut triangles = Vec::new();
    for i in 0..rim {
        let j = (i + 1) % rim;
        quad(&mut triangles, i, j, rim + j, rim + i); // wall, facing outward
        triangles.push([2 * rim, j, i]); // bottom fan
        triangles.push([2 * rim + 1, rim + i, rim + j]); // top fan
    }
    flat_shaded(&positions, &triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn assert_valid(mesh: &MeshData) {
        assert!(!mesh.vertices.is_empty());
        assert!(mesh.indices.len() % 3 == 0);
        assert!(mesh.is_well_formed());
        for v in &mesh.vertices {
            let n = Vec3::new(v.normal[0], v.normal[1], v.normal[2]);
            assert!(approx_eq(n.length(), 1.0), "non-unit normal {n:?}");
        }
    }

    #[test]
    fn test_box_has_six_faces() {
        let mesh = create_box(1.5, 0.5, 1.5);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_valid(&mesh);
    }

    #[test]
    fn test_grid_counts() {
        let mesh = create_grid(20.0, 30.0, 60, 40);
        assert_eq!(mesh.vertices.len(), 60 * 40);
        assert_eq!(mesh.indices.len() as u32, 59 * 39 * 6);
        assert_valid(&mesh);
    }

    #[test]
    fn test_sphere_counts_and_radius() {
        let (slices, stacks) = (20u32, 20u32);
        let mesh = create_sphere(0.5, slices, stacks);
        assert_eq!(mesh.vertices.len() as u32, 2 + (stacks - 1) * (slices + 1));
        assert_valid(&mesh);
        for v in &mesh.vertices {
            let p = Vec3::new(v.position[0], v.position[1], v.position[2]);
            assert!(approx_eq(p.length(), 0.5));
        }
    }

    #[test]
    fn test_cylinder_is_capped() {
        let mesh = create_cylinder(0.5, 0.5, 3.0, 20, 20);
        assert_valid(&mesh);
        // Both caps present: some normals point straight up and straight down.
        assert!(mesh.vertices.iter().any(|v| v.normal == [0.0, 1.0, 0.0]));
        assert!(mesh.vertices.iter().any(|v| v.normal == [0.0, -1.0, 0.0]));
    }

    #[test]
    fn test_cone_has_no_top_cap() {
        let mesh = create_cone(1.0, 1.0, 20, 20);
        assert_valid(&mesh);
        assert!(!mesh.vertices.iter().any(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_faceted_family_is_valid() {
        for mesh in [
            create_pyramid(1.0, 1.0, 1.0),
            create_wedge(1.5, 1.5, 1.5),
            create_diamond(1.0, 1.0),
            create_octahedron(0.5),
            create_triangular_prism(1.0, 1.0, 1.0),
            create_hexagonal_prism(1.5, 1.5),
            create_octagonal_prism(1.5, 1.5),
            create_hexagonal_container(1.0, 1.0),
            create_star_prism(1.0, 1.0),
        ] {
            assert_valid(&mesh);
        }
    }

    #[test]
    fn test_prism_wall_normals_point_outward() {
        let mesh = create_regular_prism(6, 1.0, 2.0);
        // Every side-wall vertex normal should face away from the axis.
        for v in &mesh.vertices {
            if v.normal[1].abs() < 0.5 {
                let p = Vec3::new(v.position[0], 0.0, v.position[2]);
                let n = Vec3::new(v.normal[0], v.normal[1], v.normal[2]);
                assert!(p.dot(n) > 0.0, "inward-facing wall normal");
            }
        }
    }
}
