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

//! GPU-side mirror of the frame resource ring.
//!
//! For every ring slot this module owns a pass uniform buffer, an object
//! uniform buffer addressed with dynamic offsets, and a material storage
//! buffer, each with a pre-created bind group. Buffers and bind groups are
//! allocated once at startup; per frame the staged CPU arrays are shipped
//! over with plain `write_buffer` calls.

use std::mem;
use std::num::NonZeroU64;

use citadel_core::frame::{FrameResource, MaterialConstants, ObjectConstants, PassConstants};

/// Bind group layouts shared by the pipeline and every frame slot.
#[derive(Debug)]
pub struct FrameBindLayouts {
    pub pass: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
    pub material: wgpu::BindGroupLayout,
}

impl FrameBindLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let pass = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pass constants layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(mem::size_of::<PassConstants>() as u64),
                },
                count: None,
            }],
        });

        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object constants layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(mem::size_of::<ObjectConstants>() as u64),
                },
                count: None,
            }],
        });

        let material = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material constants layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(mem::size_of::<MaterialConstants>() as u64),
                },
                count: None,
            }],
        });

        Self {
            pass,
            object,
            material,
        }
    }
}

/// One ring slot's GPU buffers and bind groups.
#[derive(Debug)]
struct FrameSlot {
    pass_buffer: wgpu::Buffer,
    object_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    pass_bind: wgpu::BindGroup,
    object_bind: wgpu::BindGroup,
    material_bind: wgpu::BindGroup,
}

/// The GPU buffers backing every slot of the frame ring.
#[derive(Debug)]
pub struct FrameBuffers {
    slots: Vec<FrameSlot>,
}

impl FrameBuffers {
    pub fn new(
        device: &wgpu::Device,
        layouts: &FrameBindLayouts,
        depth: usize,
        object_capacity: usize,
        material_capacity: usize,
    ) -> Self {
        let slots = (0..depth)
            .map(|i| Self::build_slot(device, layouts, i, object_capacity, material_capacity))
            .collect();
        Self { slots }
    }

    fn build_slot(
        device: &wgpu::Device,
        layouts: &FrameBindLayouts,
        index: usize,
        object_capacity: usize,
        material_capacity: usize,
    ) -> FrameSlot {
        let make_buffer = |label: String, size: u64, usage: wgpu::BufferUsages| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&label),
                size,
                usage: usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };

        let pass_buffer = make_buffer(
            format!("pass constants [slot {index}]"),
            mem::size_of::<PassConstants>() as u64,
            wgpu::BufferUsages::UNIFORM,
        );
        let object_buffer = make_buffer(
            format!("object constants [slot {index}]"),
            (object_capacity * mem::size_of::<ObjectConstants>()) as u64,
            wgpu::BufferUsages::UNIFORM,
        );
        let material_buffer = make_buffer(
            format!("material constants [slot {index}]"),
            (material_capacity * mem::size_of::<MaterialConstants>()) as u64,
            wgpu::BufferUsages::STORAGE,
        );

        let pass_bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pass constants"),
            layout: &layouts.pass,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: pass_buffer.as_entire_binding(),
            }],
        });
        // The object bind group exposes a single slot's window; dynamic
        // offsets slide it across the buffer at draw time.
        let object_bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object constants"),
            layout: &layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: NonZeroU64::new(mem::size_of::<ObjectConstants>() as u64),
                }),
            }],
        });
        let material_bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material constants"),
            layout: &layouts.material,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buffer.as_entire_binding(),
            }],
        });

        FrameSlot {
            pass_buffer,
            object_buffer,
            material_buffer,
            pass_bind,
            object_bind,
            material_bind,
        }
    }

    /// Ships `frame`'s staged constants to slot `index`'s GPU buffers.
    pub fn upload(&self, queue: &wgpu::Queue, index: usize, frame: &FrameResource) {
        let slot = &self.slots[index];
        queue.write_buffer(&slot.pass_buffer, 0, bytemuck::bytes_of(&frame.pass));
        queue.write_buffer(&slot.object_buffer, 0, frame.objects.as_bytes());
        queue.write_buffer(&slot.material_buffer, 0, frame.materials.as_bytes());
    }

    pub fn pass_bind(&self, index: usize) -> &wgpu::BindGroup {
        &self.slots[index].pass_bind
    }

    pub fn object_bind(&self, index: usize) -> &wgpu::BindGroup {
        &self.slots[index].object_bind
    }

    pub fn material_bind(&self, index: usize) -> &wgpu::BindGroup {
        &self.slots[index].material_bind
    }
}
