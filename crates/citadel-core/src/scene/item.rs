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

use crate::frame::{ObjectConstants, FRAMES_IN_FLIGHT};
use crate::geometry::Submesh;
use crate::math::Mat4;

/// One drawable scene instance.
///
/// Couples a world and texture transform with a [`Submesh`] into the shared
/// geometry buffers, a material slot, and its own slot in the per-frame
/// object constant buffers. Transform edits re-arm the dirty counter so the
/// change propagates into every buffered copy.
#[derive(Debug)]
pub struct RenderItem {
    name: &'static str,
    world: Mat4,
    tex_transform: Mat4,
    submesh: Submesh,
    object_slot: usize,
    material_slot: u32,
    dirty: usize,
}

impl RenderItem {
    pub(super) fn new(
        name: &'static str,
        world: Mat4,
        tex_transform: Mat4,
        submesh: Submesh,
        object_slot: usize,
        material_slot: u32,
    ) -> Self {
        Self {
            name,
            world,
            tex_transform,
            submesh,
            object_slot,
            material_slot,
            dirty: FRAMES_IN_FLIGHT,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub fn submesh(&self) -> Submesh {
        self.submesh
    }

    /// Slot in the per-frame object constant buffers; doubles as the
    /// dynamic-offset index for the draw call.
    pub fn object_slot(&self) -> usize {
        self.object_slot
    }

    pub fn material_slot(&self) -> u32 {
        self.material_slot
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty
    }

    pub fn set_world(&mut self, world: Mat4) {
        self.world = world;
        self.dirty = FRAMES_IN_FLIGHT;
    }

    pub fn set_tex_transform(&mut self, tex_transform: Mat4) {
        self.tex_transform = tex_transform;
        self.dirty = FRAMES_IN_FLIGHT;
    }

    /// Consumes one pending propagation; see [`Material::take_dirty`]
    /// (super::material::Material).
    pub(super) fn take_dirty(&mut self) -> bool {
        if self.dirty > 0 {
            self.dirty -= 1;
            true
        } else {
            false
        }
    }

    pub fn constants(&self) -> ObjectConstants {
        ObjectConstants::new(self.world, self.tex_transform, self.material_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn test_item() -> RenderItem {
        RenderItem::new(
            "keep",
            Mat4::from_translation(Vec3::new(0.0, 0.5, 6.0)),
            Mat4::IDENTITY,
            Submesh {
                index_count: 36,
                start_index: 0,
                base_vertex: 0,
            },
            0,
            1,
        )
    }

    #[test]
    fn test_new_item_needs_full_propagation() {
        let mut item = test_item();
        assert_eq!(item.dirty_count(), FRAMES_IN_FLIGHT);
        for remaining in (0..FRAMES_IN_FLIGHT).rev() {
            assert!(item.take_dirty());
            assert_eq!(item.dirty_count(), remaining);
        }
        assert!(!item.take_dirty());
    }

    #[test]
    fn test_world_edit_rearms_counter() {
        let mut item = test_item();
        while item.take_dirty() {}
        item.set_world(Mat4::IDENTITY);
        assert_eq!(item.dirty_count(), FRAMES_IN_FLIGHT);
    }

    #[test]
    fn test_constants_carry_material_slot() {
        let item = test_item();
        assert_eq!(item.constants().material_index, 1);
    }
}
