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

use std::mem;

use anyhow::Result;
use wgpu::util::DeviceExt;

use citadel_core::frame::{FrameResource, ObjectConstants};
use citadel_core::geometry::{MeshLibrary, Vertex};
use citadel_core::scene::Scene;

use crate::context::GraphicsContext;
use crate::frames::{FrameBindLayouts, FrameBuffers};
use crate::textures::{create_depth_view, SceneTextures, DEPTH_FORMAT};

/// The forward renderer for the castle scene.
///
/// Owns the pipeline, the shared vertex/index buffers holding every packed
/// mesh, the per-ring-slot constant buffers, and the texture array. The
/// frame loop lives with the caller; this type only uploads staged constants
/// and encodes draw calls.
#[derive(Debug)]
pub struct Renderer {
    pipeline: wgpu::RenderPipeline,
    frame_buffers: FrameBuffers,
    textures: SceneTextures,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
}

impl Renderer {
    pub fn new(
        context: &GraphicsContext,
        library: &MeshLibrary,
        ring_depth: usize,
        object_capacity: usize,
        material_capacity: usize,
    ) -> Result<Self> {
        let device = &context.device;

        let layouts = FrameBindLayouts::new(device);
        let frame_buffers = FrameBuffers::new(
            device,
            &layouts,
            ring_depth,
            object_capacity,
            material_capacity,
        );
        let textures = SceneTextures::new(device, &context.queue);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene vertices"),
            contents: library.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene indices"),
            contents: library.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::info!(
            "Scene geometry packed: {} vertices, {} indices",
            library.vertices().len(),
            library.indices().len()
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("castle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/castle.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("castle pipeline layout"),
            bind_group_layouts: &[
                &layouts.pass,
                &layouts.object,
                &layouts.material,
                &textures.layout,
            ],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("castle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                // The scene is authored left-handed with clockwise front
                // faces.
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let (width, height) = context.size();
        let depth_view = create_depth_view(device, width, height);

        Ok(Self {
            pipeline,
            frame_buffers,
            textures,
            vertex_buffer,
            index_buffer,
            depth_view,
            clear_color: wgpu::Color {
                r: 0.43,
                g: 0.55,
                b: 0.73,
                a: 1.0,
            },
        })
    }

    /// Recreates size-dependent resources after a surface resize.
    pub fn resize(&mut self, context: &GraphicsContext) {
        let (width, height) = context.size();
        self.depth_view = create_depth_view(&context.device, width, height);
    }

    /// Ships the staged constants of ring slot `slot` to the GPU.
    pub fn upload_frame(&self, context: &GraphicsContext, slot: usize, frame: &FrameResource) {
        self.frame_buffers.upload(&context.queue, slot, frame);
    }

    /// Encodes and submits one frame's draw calls from ring slot `slot`,
    /// then presents.
    pub fn draw(
        &self,
        context: &GraphicsContext,
        slot: usize,
        scene: &Scene,
    ) -> Result<(), wgpu::SurfaceError> {
        let surface_texture = context.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("castle frame"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("castle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, self.frame_buffers.pass_bind(slot), &[]);
            pass.set_bind_group(2, self.frame_buffers.material_bind(slot), &[]);
            pass.set_bind_group(3, &self.textures.bind, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            let stride = mem::size_of::<ObjectConstants>() as u32;
            for item in scene.items() {
                let offset = item.object_slot() as u32 * stride;
                pass.set_bind_group(1, self.frame_buffers.object_bind(slot), &[offset]);
                let submesh = item.submesh();
                pass.draw_indexed(
                    submesh.start_index..submesh.start_index + submesh.index_count,
                    submesh.base_vertex,
                    0..1,
                );
            }
        }

        context.queue.submit(Some(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
