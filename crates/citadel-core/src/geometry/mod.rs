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

//! Procedural mesh generation and flat-buffer packing.
//!
//! Every shape the scene uses is generated at startup and packed into one
//! shared vertex/index buffer pair so all draw calls address sub-ranges of a
//! single binding (see [`pack::MeshLibrary`]).

mod mesh;
pub mod pack;
pub mod shapes;

pub use mesh::{MeshData, Vertex};
pub use pack::{MeshLibrary, Submesh};
