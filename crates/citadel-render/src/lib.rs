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

//! # Citadel Render
//!
//! wgpu backend for the Citadel demo: the device/surface context, the GPU
//! mirror of the frame resource ring, the submission fence, and the forward
//! renderer for the packed castle geometry.

pub mod context;
pub mod fence;
pub mod frames;
pub mod renderer;
pub mod textures;

pub use context::GraphicsContext;
pub use fence::SubmissionFence;
pub use renderer::Renderer;
