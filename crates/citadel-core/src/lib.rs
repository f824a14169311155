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

//! # Citadel Core
//!
//! Backend-agnostic heart of the Citadel demo: math, camera, procedural
//! geometry, the frame resource ring, and the scene model. Nothing in this
//! crate talks to a GPU; the `citadel-render` crate maps these types onto an
//! actual device.

pub mod camera;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod scene;
pub mod timing;

pub use camera::Camera;
pub use timing::FrameTimer;
