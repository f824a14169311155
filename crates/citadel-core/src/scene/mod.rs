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

//! Scene state and its propagation into the frame resource ring.
//!
//! A [`Scene`] is a flat list of [`Material`]s and [`RenderItem`]s built once
//! from a declarative [`SceneDesc`] table. Items and materials carry a dirty
//! counter initialized to the ring depth; each frame,
//! [`Scene::flush_into`] copies every still-dirty entry into the current
//! [`FrameResource`] and decrements the counter, so a single logical edit
//! converges into all buffered copies within ring-depth frames.

pub mod builder;
pub mod description;
pub mod item;
pub mod material;

pub use builder::SceneBuilder;
pub use description::{ItemDesc, MaterialDesc, SceneDesc};
pub use item::RenderItem;
pub use material::Material;

use crate::error::UploadError;
use crate::frame::FrameResource;

/// The built scene: materials and drawable items with assigned buffer slots.
#[derive(Debug, Default)]
pub struct Scene {
    materials: Vec<Material>,
    items: Vec<RenderItem>,
}

impl Scene {
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [RenderItem] {
        &mut self.items
    }

    pub fn materials_mut(&mut self) -> &mut [Material] {
        &mut self.materials
    }

    pub fn item_by_name(&mut self, name: &str) -> Option<&mut RenderItem> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    pub fn material_by_name(&mut self, name: &str) -> Option<&mut Material> {
        self.materials
            .iter_mut()
            .find(|material| material.name() == name)
    }

    /// Copies every dirty item and material into `frame` and decrements the
    /// corresponding dirty counters.
    ///
    /// Entries whose counter already reached zero are skipped, so steady
    /// state costs one pass over the lists and no buffer writes.
    pub fn flush_into(&mut self, frame: &mut FrameResource) -> Result<(), UploadError> {
        for item in &mut self.items {
            if item.take_dirty() {
                frame.objects.write(item.object_slot(), item.constants())?;
            }
        }
        for material in &mut self.materials {
            if material.take_dirty() {
                frame
                    .materials
                    .write(material.slot(), material.constants())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FenceError;
    use crate::frame::{DeviceFence, FrameRing, FRAMES_IN_FLIGHT};
    use crate::geometry::{shapes, MeshLibrary};
    use crate::math::{Mat4, Vec3, Vec4};
    use std::time::Duration;

    /// A fence whose slots are always free, so `acquire_next` never blocks.
    struct ReadyFence;

    impl DeviceFence for ReadyFence {
        fn completed_value(&self) -> u64 {
            u64::MAX
        }

        fn wait(&self, _value: u64, _timeout: Duration) -> Result<(), FenceError> {
            Ok(())
        }
    }

    fn test_scene() -> Scene {
        let mut library = MeshLibrary::new();
        library
            .add("box", shapes::create_box(1.0, 1.0, 1.0))
            .unwrap();

        let desc = SceneDesc {
            materials: vec![MaterialDesc {
                name: "stone",
                albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
                fresnel_r0: Vec3::splat(0.05),
                roughness: 0.3,
                diffuse_map_index: 1,
                transform: Mat4::IDENTITY,
            }],
            items: vec![ItemDesc {
                name: "keep",
                mesh: "box",
                material: "stone",
                world: Mat4::from_translation(Vec3::new(0.0, 0.5, 6.0)),
                tex_transform: Mat4::IDENTITY,
            }],
        };
        SceneBuilder::build(&desc, &library).unwrap()
    }

    #[test]
    fn test_edit_converges_in_ring_depth_updates() {
        let mut scene = test_scene();
        let mut frames: Vec<FrameResource> = (0..FRAMES_IN_FLIGHT)
            .map(|_| FrameResource::new(4, 4))
            .collect();

        // Initial population: every frame copy converges to the start state.
        for frame in &mut frames {
            scene.flush_into(frame).unwrap();
        }

        let new_world = Mat4::from_translation(Vec3::new(9.0, 0.0, 0.0));
        scene
            .item_by_name("keep")
            .unwrap()
            .set_world(new_world);
        let expected = scene.items()[0].constants();

        // Edited at cycle 0: copied at cycles 0, 1, 2 and in none before its
        // own turn.
        for (cycle, frame) in frames.iter_mut().enumerate() {
            assert_eq!(scene.items()[0].dirty_count(), FRAMES_IN_FLIGHT - cycle);
            scene.flush_into(frame).unwrap();
            assert_eq!(frame.objects.get(0), Some(&expected));
        }
        assert_eq!(scene.items()[0].dirty_count(), 0);

        // A fourth cycle writes nothing.
        let mut spare = FrameResource::new(4, 4);
        scene.flush_into(&mut spare).unwrap();
        assert_ne!(spare.objects.get(0), Some(&expected));
    }

    #[test]
    fn test_stale_copies_update_on_their_own_turn_only() {
        let mut scene = test_scene();
        let mut frames: Vec<FrameResource> = (0..FRAMES_IN_FLIGHT)
            .map(|_| FrameResource::new(4, 4))
            .collect();
        for frame in &mut frames {
            scene.flush_into(frame).unwrap();
        }
        let stale = scene.items()[0].constants();

        scene
            .item_by_name("keep")
            .unwrap()
            .set_world(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let fresh = scene.items()[0].constants();

        // Only frame 0 has been flushed since the edit; the others still
        // hold the old payload.
        scene.flush_into(&mut frames[0]).unwrap();
        assert_eq!(frames[0].objects.get(0), Some(&fresh));
        assert_eq!(frames[1].objects.get(0), Some(&stale));
        assert_eq!(frames[2].objects.get(0), Some(&stale));
    }

    #[test]
    fn test_material_edit_propagates_independently() {
        let mut scene = test_scene();
        let mut ring = FrameRing::new(4, 4);
        let fence = ReadyFence;
        let timeout = Duration::from_millis(1);

        // Drain the initial dirty counters, rotating through every slot so
        // each ring copy receives the starting material.
        for _ in 0..FRAMES_IN_FLIGHT {
            let frame = ring.acquire_next(&fence, timeout).unwrap();
            scene.flush_into(frame).unwrap();
            assert_eq!(frame.materials.get(0).unwrap().roughness, 0.3);
        }

        scene.material_by_name("stone").unwrap().set_roughness(0.9);
        assert_eq!(
            scene.materials()[0].dirty_count(),
            FRAMES_IN_FLIGHT,
            "material edit re-arms its own counter"
        );
        assert_eq!(
            scene.items()[0].dirty_count(),
            0,
            "item counters are untouched by material edits"
        );

        let frame = ring.acquire_next(&fence, timeout).unwrap();
        scene.flush_into(frame).unwrap();
        assert_eq!(frame.materials.get(0).unwrap().roughness, 0.9);
    }
}
