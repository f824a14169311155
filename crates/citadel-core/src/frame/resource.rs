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

use super::constants::{MaterialConstants, ObjectConstants, PassConstants};
use super::upload::UploadBuffer;

/// One buffered set of per-frame constant data.
///
/// The ring owns [`FRAMES_IN_FLIGHT`](super::FRAMES_IN_FLIGHT) of these.
/// While the GPU reads one set, the CPU fills another; `fence_value` records
/// which submission last used this set, so the ring knows when it is safe to
/// hand back.
#[derive(Debug)]
pub struct FrameResource {
    /// Whole-frame globals, rewritten every frame.
    pub pass: PassConstants,
    /// Per-item constants, written only for items with pending updates.
    pub objects: UploadBuffer<ObjectConstants>,
    /// Per-material constants, written only for dirty materials.
    pub materials: UploadBuffer<MaterialConstants>,
    /// Fence value of the last submission that consumed this set, or 0 if it
    /// has never been submitted.
    pub fence_value: u64,
}

impl FrameResource {
    pub fn new(object_capacity: usize, material_capacity: usize) -> Self {
        Self {
            pass: PassConstants::default(),
            objects: UploadBuffer::new("object constants", object_capacity),
            materials: UploadBuffer::new("material constants", material_capacity),
            fence_value: 0,
        }
    }
}
