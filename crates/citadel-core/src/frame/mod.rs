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

//! The frame resource ring: N buffered sets of per-frame constant data.
//!
//! The CPU prepares frame `k`'s constants while the GPU still consumes frame
//! `k - 1` (and possibly `k - 2`). Rotating among [`FRAMES_IN_FLIGHT`]
//! independent [`FrameResource`]s and gating reuse on a monotonic fence
//! counter makes that overlap race-free: a slot is only handed back to the
//! CPU once the fence confirms the GPU has drained it.

pub mod constants;
pub mod fence;
pub mod resource;
pub mod ring;
pub mod upload;

pub use constants::{LightConstants, MaterialConstants, ObjectConstants, PassConstants, MAX_LIGHTS};
pub use fence::DeviceFence;
pub use resource::FrameResource;
pub use ring::FrameRing;
pub use upload::UploadBuffer;

/// Depth of the frame resource ring.
///
/// Three slots let the CPU run up to two frames ahead of the GPU before the
/// fence wait at the top of the frame becomes the pacing point.
pub const FRAMES_IN_FLIGHT: usize = 3;
