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

//! Defines the hierarchy of error types for the core crate.

use std::fmt;
use std::time::Duration;

/// An error raised while waiting on the GPU completion fence.
#[derive(Debug)]
pub enum FenceError {
    /// The fence did not reach the awaited value within the timeout. The
    /// device is presumed hung or lost.
    Timeout {
        /// The fence value that was being waited for.
        value: u64,
        /// How long the caller was willing to wait.
        timeout: Duration,
    },
    /// The device reported an error while the fence was being polled.
    Device(String),
}

impl fmt::Display for FenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenceError::Timeout { value, timeout } => {
                write!(
                    f,
                    "Fence value {value} not reached within {timeout:?}; device presumed lost"
                )
            }
            FenceError::Device(details) => {
                write!(f, "Device error while waiting on fence: {details}")
            }
        }
    }
}

impl std::error::Error for FenceError {}

/// An error raised when writing to a per-frame upload buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum UploadError {
    /// The requested element slot is outside the buffer's fixed capacity.
    SlotOutOfRange {
        /// Debug label of the buffer.
        label: &'static str,
        /// The offending slot index.
        slot: usize,
        /// The buffer's element capacity.
        capacity: usize,
    },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::SlotOutOfRange {
                label,
                slot,
                capacity,
            } => {
                write!(
                    f,
                    "Slot {slot} out of range for upload buffer '{label}' (capacity {capacity})"
                )
            }
        }
    }
}

impl std::error::Error for UploadError {}

/// An error raised while packing meshes into the shared geometry buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// A mesh with the same name was already packed.
    DuplicateMesh(String),
    /// A mesh had indices but no vertices, or an index referenced a vertex
    /// outside the mesh.
    MalformedMesh {
        name: String,
        details: String,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DuplicateMesh(name) => {
                write!(f, "Mesh '{name}' is already packed in this library")
            }
            GeometryError::MalformedMesh { name, details } => {
                write!(f, "Mesh '{name}' is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// An error raised while building a scene from its declarative description.
#[derive(Debug, PartialEq, Eq)]
pub enum SceneError {
    /// An item referenced a mesh name the library does not contain.
    UnknownMesh {
        item: String,
        mesh: String,
    },
    /// An item referenced a material name the description does not define.
    UnknownMaterial {
        item: String,
        material: String,
    },
    /// Two materials in the description share a name.
    DuplicateMaterial(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownMesh { item, mesh } => {
                write!(f, "Item '{item}' references unknown mesh '{mesh}'")
            }
            SceneError::UnknownMaterial { item, material } => {
                write!(f, "Item '{item}' references unknown material '{material}'")
            }
            SceneError::DuplicateMaterial(name) => {
                write!(f, "Material '{name}' is defined more than once")
            }
        }
    }
}

impl std::error::Error for SceneError {}
