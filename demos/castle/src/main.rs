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

//! Castle demo entry point.
//!
//! Drives the frame resource ring from a winit event loop: acquire a free
//! ring slot, flush dirty scene state into it, upload, draw, then tag the
//! slot with the submission's fence value.

mod scene;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use citadel_core::frame::{FrameRing, LightConstants, PassConstants, MAX_LIGHTS};
use citadel_core::math::{radians, Mat4, Vec3, PI};
use citadel_core::scene::{Scene, SceneBuilder};
use citadel_core::{Camera, FrameTimer};
use citadel_render::{GraphicsContext, Renderer, SubmissionFence};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// How long to wait for the GPU to release a ring slot before giving up.
/// A healthy frame finishes in milliseconds; hitting this means the device
/// is wedged.
const FENCE_TIMEOUT: Duration = Duration::from_secs(5);

const WALK_SPEED: f32 = 10.0;
const ROLL_SPEED: f32 = 1.5;
/// Mouse-look sensitivity, degrees per pixel of drag.
const LOOK_DEGREES_PER_PIXEL: f32 = 0.25;

struct CastleState {
    window: Arc<Window>,
    context: GraphicsContext,
    renderer: Renderer,
    scene: Scene,
    ring: FrameRing,
    fence: SubmissionFence,
    camera: Camera,
    timer: FrameTimer,

    keys_down: HashSet<KeyCode>,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl CastleState {
    fn init(event_loop: &ActiveEventLoop) -> Result<Self> {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Citadel castle demo")
                        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720)),
                )
                .context("failed to create window")?,
        );

        let context = pollster::block_on(GraphicsContext::new(window.clone()))?;

        let library = scene::build_mesh_library()?;
        let desc = scene::castle_scene();
        let object_capacity = desc.items.len();
        let material_capacity = desc.materials.len();
        let scene = SceneBuilder::build(&desc, &library)?;

        let ring = FrameRing::new(object_capacity, material_capacity);
        let fence = SubmissionFence::new(context.device.clone());
        let renderer = Renderer::new(
            &context,
            &library,
            ring.depth(),
            object_capacity,
            material_capacity,
        )?;

        let mut camera = Camera::new();
        camera.set_position(Vec3::new(0.0, 2.0, -15.0));
        camera.set_lens(0.25 * PI, context.aspect_ratio(), 1.0, 1000.0);

        log::info!(
            "scene ready: {} items, {} materials, ring depth {}",
            object_capacity,
            material_capacity,
            ring.depth()
        );

        Ok(Self {
            window,
            context,
            renderer,
            scene,
            ring,
            fence,
            camera,
            timer: FrameTimer::new(),
            keys_down: HashSet::new(),
            dragging: false,
            last_cursor: None,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
        self.camera
            .set_lens(0.25 * PI, self.context.aspect_ratio(), 1.0, 1000.0);
    }

    fn apply_input(&mut self, dt: f32) {
        if self.keys_down.contains(&KeyCode::KeyW) {
            self.camera.walk(WALK_SPEED * dt);
        }
        if self.keys_down.contains(&KeyCode::KeyS) {
            self.camera.walk(-WALK_SPEED * dt);
        }
        if self.keys_down.contains(&KeyCode::KeyA) {
            self.camera.strafe(-WALK_SPEED * dt);
        }
        if self.keys_down.contains(&KeyCode::KeyD) {
            self.camera.strafe(WALK_SPEED * dt);
        }
        if self.keys_down.contains(&KeyCode::KeyE) {
            self.camera.roll(ROLL_SPEED * dt);
        }
        if self.keys_down.contains(&KeyCode::KeyQ) {
            self.camera.roll(-ROLL_SPEED * dt);
        }
    }

    fn mouse_look(&mut self, dx: f64, dy: f64) {
        self.camera.pitch(radians(LOOK_DEGREES_PER_PIXEL * dy as f32));
        self.camera
            .rotate_y(radians(LOOK_DEGREES_PER_PIXEL * dx as f32));
    }

    /// Fills the per-frame globals for the slot about to be drawn. Matrices
    /// are stored transposed; the shader multiplies vectors from the left.
    fn compose_pass(&self, pass: &mut PassConstants) {
        let view = self.camera.view();
        let proj = self.camera.proj();
        let view_proj = proj * view;

        pass.view = view.transpose().to_cols_array_2d();
        pass.inv_view = view
            .inverse()
            .unwrap_or(Mat4::IDENTITY)
            .transpose()
            .to_cols_array_2d();
        pass.proj = proj.transpose().to_cols_array_2d();
        pass.inv_proj = proj
            .inverse()
            .unwrap_or(Mat4::IDENTITY)
            .transpose()
            .to_cols_array_2d();
        pass.view_proj = view_proj.transpose().to_cols_array_2d();
        pass.inv_view_proj = view_proj
            .inverse()
            .unwrap_or(Mat4::IDENTITY)
            .transpose()
            .to_cols_array_2d();

        pass.eye_pos = self.camera.position().to_array();

        let (width, height) = self.context.size();
        pass.render_target_size = [width as f32, height as f32];
        pass.inv_render_target_size = [1.0 / width as f32, 1.0 / height as f32];
        pass.near_z = self.camera.near_z();
        pass.far_z = self.camera.far_z();
        pass.total_time = self.timer.total_time();
        pass.delta_time = self.timer.delta_time();

        pass.ambient_light = scene::AMBIENT_LIGHT;
        let lights = scene::lights();
        debug_assert!(lights.len() <= MAX_LIGHTS);
        pass.lights = [LightConstants::default(); MAX_LIGHTS];
        for (slot, light) in pass.lights.iter_mut().zip(lights) {
            *slot = light;
        }
    }

    fn render_frame(&mut self) -> Result<()> {
        let dt = self.timer.tick();
        self.apply_input(dt);
        self.camera.update_view_matrix();

        let frame = self.ring.acquire_next(&self.fence, FENCE_TIMEOUT)?;
        self.scene.flush_into(frame)?;

        let mut pass = frame.pass;
        self.compose_pass(&mut pass);
        self.ring.current_frame().pass = pass;

        let slot = self.ring.current_index();
        self.renderer
            .upload_frame(&self.context, slot, self.ring.current_frame());

        match self.renderer.draw(&self.context, slot, &self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = self.context.size();
                self.resize(width, height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface acquire timed out, skipping frame");
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        }

        let fence_value = self.fence.signal(&self.context.queue);
        self.ring.record_completion(fence_value);
        Ok(())
    }
}

#[derive(Default)]
struct CastleApp {
    state: Option<CastleState>,
}

impl ApplicationHandler for CastleApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match CastleState::init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(error) => {
                log::error!("initialization failed: {error:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.window.id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("shutdown requested, exiting event loop");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                state.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            state.keys_down.insert(code);
                        }
                        ElementState::Released => {
                            state.keys_down.remove(&code);
                        }
                    }
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                state.dragging = button_state == ElementState::Pressed;
                if !state.dragging {
                    state.last_cursor = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if state.dragging {
                    if let Some((last_x, last_y)) = state.last_cursor {
                        state.mouse_look(position.x - last_x, position.y - last_y);
                    }
                }
                state.last_cursor = Some((position.x, position.y));
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = state.render_frame() {
                    log::error!("frame failed: {error:#}");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let mut app = CastleApp::default();
    event_loop.run_app(&mut app)?;
    Ok(())
}
