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

//! Texture resources: the diffuse texture array sampled by material index,
//! and the depth attachment.
//!
//! The diffuse layers are generated procedurally (brick, stone, tile,
//! planks) so the demo carries no asset files. Materials select a layer via
//! `diffuse_map_index`.

const TEXTURE_SIZE: u32 = 64;

/// Layer order in the diffuse array. Material tables index into this.
pub const DIFFUSE_LAYERS: u32 = 4;

/// Builds the 4-layer RGBA8 diffuse array, uploads it, and returns its view
/// together with a repeat-wrap sampler and the shared bind group.
#[derive(Debug)]
pub struct SceneTextures {
    pub layout: wgpu::BindGroupLayout,
    pub bind: wgpu::BindGroup,
}

impl SceneTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let size = wgpu::Extent3d {
            width: TEXTURE_SIZE,
            height: TEXTURE_SIZE,
            depth_or_array_layers: DIFFUSE_LAYERS,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("diffuse array"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let mut pixels =
            Vec::with_capacity((TEXTURE_SIZE * TEXTURE_SIZE * 4 * DIFFUSE_LAYERS) as usize);
        for layer in 0..DIFFUSE_LAYERS {
            for y in 0..TEXTURE_SIZE {
                for x in 0..TEXTURE_SIZE {
                    pixels.extend(texel(layer, x, y));
                }
            }
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(TEXTURE_SIZE * 4),
                rows_per_image: Some(TEXTURE_SIZE),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("diffuse sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("diffuse array layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2Array,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("diffuse array"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self { layout, bind }
    }
}

/// One pixel of a procedural layer pattern.
fn texel(layer: u32, x: u32, y: u32) -> [u8; 4] {
    match layer {
        // Brick: running bond with mortar lines.
        0 => {
            let row = y / 16;
            let shifted_x = x + if row % 2 == 0 { 0 } else { 16 };
            let mortar = y % 16 < 2 || shifted_x % 32 < 2;
            if mortar {
                [180, 175, 170, 255]
            } else {
                let tint = ((x * 7 + y * 13) % 23) as u8;
                [150 + tint, 70 + tint / 2, 55, 255]
            }
        }
        // Stone: irregular gray blotches.
        1 => {
            let n = (x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17))) % 61;
            let base = 120 + (n % 40) as u8;
            let joint = x % 21 < 2 || y % 13 < 2;
            if joint {
                [90, 90, 92, 255]
            } else {
                [base, base, base.saturating_add(8), 255]
            }
        }
        // Tile: checkerboard of glazed squares.
        2 => {
            let check = (x / 8 + y / 8) % 2 == 0;
            let edge = x % 8 == 0 || y % 8 == 0;
            if edge {
                [70, 70, 75, 255]
            } else if check {
                [200, 60, 50, 255]
            } else {
                [225, 215, 195, 255]
            }
        }
        // Planks: vertical boards with grain.
        _ => {
            let seam = x % 16 < 1;
            if seam {
                [80, 55, 35, 255]
            } else {
                let grain = ((y * 5 + x * 2) % 17) as u8;
                [140 + grain, 95 + grain / 2, 55, 255]
            }
        }
    }
}

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Creates the depth attachment for the current surface size.
pub fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth attachment"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
