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

use crate::frame::{MaterialConstants, FRAMES_IN_FLIGHT};
use crate::math::{Mat4, Vec3, Vec4};

/// Mutable shading parameters shared by any number of render items.
///
/// Edits re-arm the dirty counter to the ring depth so the new values reach
/// every buffered copy of the material constants; see
/// [`Scene::flush_into`](super::Scene::flush_into).
#[derive(Debug)]
pub struct Material {
    name: &'static str,
    slot: usize,
    albedo: Vec4,
    fresnel_r0: Vec3,
    roughness: f32,
    transform: Mat4,
    diffuse_map_index: u32,
    dirty: usize,
}

impl Material {
    pub(super) fn new(
        name: &'static str,
        slot: usize,
        albedo: Vec4,
        fresnel_r0: Vec3,
        roughness: f32,
        transform: Mat4,
        diffuse_map_index: u32,
    ) -> Self {
        Self {
            name,
            slot,
            albedo,
            fresnel_r0,
            roughness,
            transform,
            diffuse_map_index,
            dirty: FRAMES_IN_FLIGHT,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Slot in the per-frame material constant buffers.
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty
    }

    pub fn set_albedo(&mut self, albedo: Vec4) {
        self.albedo = albedo;
        self.dirty = FRAMES_IN_FLIGHT;
    }

    pub fn set_fresnel_r0(&mut self, fresnel_r0: Vec3) {
        self.fresnel_r0 = fresnel_r0;
        self.dirty = FRAMES_IN_FLIGHT;
    }

    pub fn set_roughness(&mut self, roughness: f32) {
        self.roughness = roughness;
        self.dirty = FRAMES_IN_FLIGHT;
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
        self.dirty = FRAMES_IN_FLIGHT;
    }

    /// Consumes one pending propagation. Returns whether the caller should
    /// copy this material's constants into the current frame.
    pub(super) fn take_dirty(&mut self) -> bool {
        if self.dirty > 0 {
            self.dirty -= 1;
            true
        } else {
            false
        }
    }

    /// Packs the shading parameters for the GPU, transposing the UV
    /// transform like every other matrix that crosses the boundary.
    pub fn constants(&self) -> MaterialConstants {
        MaterialConstants {
            albedo: self.albedo.to_array(),
            fresnel_r0: self.fresnel_r0.to_array(),
            roughness: self.roughness,
            transform: self.transform.transpose().to_cols_array_2d(),
            diffuse_map_index: self.diffuse_map_index,
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_rearm_dirty_counter() {
        let mut material = Material::new(
            "bricks",
            0,
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            Vec3::splat(0.02),
            0.1,
            Mat4::IDENTITY,
            0,
        );
        while material.take_dirty() {}
        assert_eq!(material.dirty_count(), 0);

        material.set_roughness(0.5);
        assert_eq!(material.dirty_count(), FRAMES_IN_FLIGHT);
        assert!(material.take_dirty());
        assert_eq!(material.dirty_count(), FRAMES_IN_FLIGHT - 1);
    }

    #[test]
    fn test_constants_pack_fields() {
        let material = Material::new(
            "tile",
            3,
            Vec4::new(0.9, 0.9, 1.0, 1.0),
            Vec3::splat(0.02),
            0.3,
            Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0)),
            2,
        );
        let constants = material.constants();
        assert_eq!(constants.albedo, [0.9, 0.9, 1.0, 1.0]);
        assert_eq!(constants.roughness, 0.3);
        assert_eq!(constants.diffuse_map_index, 2);
        // Scale is diagonal, unchanged by the transpose.
        assert_eq!(constants.transform[0][0], 2.0);
        assert_eq!(constants.transform[1][1], 2.0);
    }
}
