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

//! First-person fly camera.
//!
//! The camera keeps an explicit orthonormal basis (`right`, `up`, `look`)
//! rather than Euler angles, so walk/strafe/pitch/yaw/roll compose without
//! gimbal surprises. The view matrix is rebuilt lazily after movement.

use crate::math::{Mat4, Vec3};

/// Rotates `v` about the unit-length `axis` by `angle` radians (Rodrigues).
fn rotate_about(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    v * c + axis.cross(v) * s + axis * (axis.dot(v) * (1.0 - c))
}

#[derive(Debug)]
pub struct Camera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    look: Vec3,

    near_z: f32,
    far_z: f32,

    view: Mat4,
    proj: Mat4,
    view_dirty: bool,
}

impl Camera {
    /// A camera at the origin looking down +Z with a default lens.
    pub fn new() -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            right: Vec3::X,
            up: Vec3::Y,
            look: Vec3::Z,
            near_z: 1.0,
            far_z: 1000.0,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            view_dirty: true,
        };
        camera.set_lens(crate::math::PI / 4.0, 1.0, 1.0, 1000.0);
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.view_dirty = true;
    }

    pub fn near_z(&self) -> f32 {
        self.near_z
    }

    pub fn far_z(&self) -> f32 {
        self.far_z
    }

    /// Rebuilds the projection matrix. Called on startup and every resize.
    pub fn set_lens(&mut self, fov_y_radians: f32, aspect: f32, near_z: f32, far_z: f32) {
        self.near_z = near_z;
        self.far_z = far_z;
        self.proj = Mat4::perspective_lh(fov_y_radians, aspect, near_z, far_z);
    }

    /// Moves along the look vector.
    pub fn walk(&mut self, distance: f32) {
        self.position += self.look * distance;
        self.view_dirty = true;
    }

    /// Moves along the right vector.
    pub fn strafe(&mut self, distance: f32) {
        self.position += self.right * distance;
        self.view_dirty = true;
    }

    /// Tilts the camera up or down about its right vector.
    pub fn pitch(&mut self, angle_radians: f32) {
        self.up = rotate_about(self.up, self.right, angle_radians);
        self.look = rotate_about(self.look, self.right, angle_radians);
        self.view_dirty = true;
    }

    /// Turns the camera about the world Y axis.
    pub fn rotate_y(&mut self, angle_radians: f32) {
        self.right = rotate_about(self.right, Vec3::Y, angle_radians);
        self.up = rotate_about(self.up, Vec3::Y, angle_radians);
        self.look = rotate_about(self.look, Vec3::Y, angle_radians);
        self.view_dirty = true;
    }

    /// Banks the camera about its look vector.
    pub fn roll(&mut self, angle_radians: f32) {
        self.right = rotate_about(self.right, self.look, angle_radians);
        self.up = rotate_about(self.up, self.look, angle_radians);
        self.view_dirty = true;
    }

    /// Re-orthonormalizes the basis and rebuilds the view matrix if any
    /// movement happened since the last call.
    pub fn update_view_matrix(&mut self) {
        if !self.view_dirty {
            return;
        }

        // Drift from repeated incremental rotations is corrected here.
        let look = self.look.normalize();
        let up = look.cross(self.right).normalize();
        let right = up.cross(look);

        self.look = look;
        self.up = up;
        self.right = right;

        self.view = Mat4::from_cols(
            crate::math::Vec4::new(right.x, up.x, look.x, 0.0),
            crate::math::Vec4::new(right.y, up.y, look.y, 0.0),
            crate::math::Vec4::new(right.z, up.z, look.z, 0.0),
            crate::math::Vec4::new(
                -right.dot(self.position),
                -up.dot(self.position),
                -look.dot(self.position),
                1.0,
            ),
        );
        self.view_dirty = false;
    }

    /// The view matrix as of the last `update_view_matrix` call.
    pub fn view(&self) -> Mat4 {
        debug_assert!(!self.view_dirty, "call update_view_matrix after moving");
        self.view
    }

    pub fn proj(&self) -> Mat4 {
        self.proj
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, radians};

    #[test]
    fn test_view_maps_world_to_eye_space() {
        let mut camera = Camera::new();
        camera.set_position(Vec3::new(0.0, 2.0, -15.0));
        camera.update_view_matrix();

        // A point straight ahead of the camera ends up on the +Z view axis.
        let p = camera.view().transform_point(Vec3::new(0.0, 2.0, -5.0));
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 0.0));
        assert!(approx_eq(p.z, 10.0));
    }

    #[test]
    fn test_walk_moves_along_look() {
        let mut camera = Camera::new();
        camera.rotate_y(radians(90.0));
        camera.walk(3.0);
        camera.update_view_matrix();

        let p = camera.position();
        assert!(approx_eq(p.x, 3.0));
        assert!(approx_eq(p.z, 0.0));
    }

    #[test]
    fn test_basis_stays_orthonormal() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.pitch(0.01);
            camera.rotate_y(0.02);
            camera.roll(0.005);
        }
        camera.update_view_matrix();

        assert!(approx_eq(camera.right.length(), 1.0));
        assert!(approx_eq(camera.up.length(), 1.0));
        assert!(approx_eq(camera.look.length(), 1.0));
        assert!(approx_eq(camera.right.dot(camera.up), 0.0));
        assert!(approx_eq(camera.up.dot(camera.look), 0.0));
    }
}
