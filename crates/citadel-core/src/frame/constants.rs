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

//! GPU constant-buffer layouts.
//!
//! These structs are mapped byte-for-byte into GPU-visible memory, so their
//! layout must stay in lockstep with the shader-side declarations. All
//! matrices are stored transposed relative to the CPU-side column-major
//! convention; the shader multiplies vectors from the left to compensate.

use bytemuck::{Pod, Zeroable};

use crate::math::Mat4;

/// Number of light slots in the pass constants. Unused slots stay zeroed,
/// which the shading model treats as "no contribution".
pub const MAX_LIGHTS: usize = 16;

/// Uniform buffers bound with dynamic offsets must be aligned to this.
pub const MIN_UNIFORM_ALIGNMENT: usize = 256;

/// Per-drawable constants, one slot per render item.
///
/// Padded out to [`MIN_UNIFORM_ALIGNMENT`] so consecutive slots double as
/// dynamic offsets into one shared uniform buffer.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ObjectConstants {
    pub world: [[f32; 4]; 4],
    pub tex_transform: [[f32; 4]; 4],
    pub material_index: u32,
    pub _pad: [u32; 31],
}

impl ObjectConstants {
    /// Packs a world and texture transform, transposing both for the shader.
    pub fn new(world: Mat4, tex_transform: Mat4, material_index: u32) -> Self {
        Self {
            world: world.transpose().to_cols_array_2d(),
            tex_transform: tex_transform.transpose().to_cols_array_2d(),
            material_index,
            _pad: [0; 31],
        }
    }
}

impl Default for ObjectConstants {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, 0)
    }
}

/// Per-material shading constants, one slot per material.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct MaterialConstants {
    pub albedo: [f32; 4],
    pub fresnel_r0: [f32; 3],
    pub roughness: f32,
    pub transform: [[f32; 4]; 4],
    pub diffuse_map_index: u32,
    pub _pad: [u32; 3],
}

impl Default for MaterialConstants {
    fn default() -> Self {
        Self {
            albedo: [1.0; 4],
            fresnel_r0: [0.01; 3],
            roughness: 0.25,
            transform: Mat4::IDENTITY.to_cols_array_2d(),
            diffuse_map_index: 0,
            _pad: [0; 3],
        }
    }
}

/// One light source. The field packing mirrors the shader struct: directional
/// lights use `direction`, point lights `position` and falloff, spot lights
/// all of it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct LightConstants {
    pub strength: [f32; 3],
    pub falloff_start: f32,
    pub direction: [f32; 3],
    pub falloff_end: f32,
    pub position: [f32; 3],
    pub spot_power: f32,
}

impl LightConstants {
    pub fn directional(direction: [f32; 3], strength: [f32; 3]) -> Self {
        Self {
            strength,
            direction,
            ..Self::default()
        }
    }

    pub fn point(position: [f32; 3], strength: [f32; 3], falloff_start: f32, falloff_end: f32) -> Self {
        Self {
            strength,
            position,
            falloff_start,
            falloff_end,
            ..Self::default()
        }
    }
}

/// Whole-frame globals: camera matrices, viewport metrics, timing, lighting.
/// One copy per frame resource.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PassConstants {
    pub view: [[f32; 4]; 4],
    pub inv_view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub inv_proj: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub eye_pos: [f32; 3],
    pub _pad0: f32,
    pub render_target_size: [f32; 2],
    pub inv_render_target_size: [f32; 2],
    pub near_z: f32,
    pub far_z: f32,
    pub total_time: f32,
    pub delta_time: f32,
    pub ambient_light: [f32; 4],
    pub lights: [LightConstants; MAX_LIGHTS],
}

impl Default for PassConstants {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            view: identity,
            inv_view: identity,
            proj: identity,
            inv_proj: identity,
            view_proj: identity,
            inv_view_proj: identity,
            eye_pos: [0.0; 3],
            _pad0: 0.0,
            render_target_size: [1.0; 2],
            inv_render_target_size: [1.0; 2],
            near_z: 0.0,
            far_z: 0.0,
            total_time: 0.0,
            delta_time: 0.0,
            ambient_light: [0.0; 4],
            lights: [LightConstants::default(); MAX_LIGHTS],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_object_constants_are_dynamic_offset_aligned() {
        assert_eq!(mem::size_of::<ObjectConstants>(), MIN_UNIFORM_ALIGNMENT);
    }

    #[test]
    fn test_material_constants_layout() {
        assert_eq!(mem::size_of::<MaterialConstants>(), 112);
        // Field offsets the shader depends on.
        assert_eq!(mem::offset_of!(MaterialConstants, fresnel_r0), 16);
        assert_eq!(mem::offset_of!(MaterialConstants, roughness), 28);
        assert_eq!(mem::offset_of!(MaterialConstants, transform), 32);
        assert_eq!(mem::offset_of!(MaterialConstants, diffuse_map_index), 96);
    }

    #[test]
    fn test_light_constants_layout() {
        assert_eq!(mem::size_of::<LightConstants>(), 48);
    }

    #[test]
    fn test_pass_constants_layout() {
        assert_eq!(
            mem::size_of::<PassConstants>(),
            6 * 64 + 48 + 16 + MAX_LIGHTS * 48
        );
        assert_eq!(mem::offset_of!(PassConstants, eye_pos), 384);
        assert_eq!(mem::offset_of!(PassConstants, ambient_light), 432);
        assert_eq!(mem::offset_of!(PassConstants, lights), 448);
    }

    #[test]
    fn test_object_constants_store_transposed_world() {
        let world = Mat4::from_translation(crate::math::Vec3::new(1.0, 2.0, 3.0));
        let constants = ObjectConstants::new(world, Mat4::IDENTITY, 0);
        // Column-major translation lives in column 3; transposed it lands in
        // the last element of the first three rows.
        assert_eq!(constants.world[0][3], 1.0);
        assert_eq!(constants.world[1][3], 2.0);
        assert_eq!(constants.world[2][3], 3.0);
    }
}
