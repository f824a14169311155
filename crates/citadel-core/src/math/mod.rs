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

//! Minimal linear algebra for the demo: vectors and a 4x4 matrix with the
//! left-handed conventions the scene data was authored in.

mod matrix;
mod vector;

pub use matrix::Mat4;
pub use vector::{Vec2, Vec3, Vec4};

/// Tolerance used for floating point comparisons throughout the math module.
pub const EPSILON: f32 = 1e-5;

/// Archimedes' constant, `f32` flavored.
pub const PI: f32 = std::f32::consts::PI;

/// Compares two floats for approximate equality using [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// Converts degrees to radians. Scene tables are authored in degrees.
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}
