// Sprite rendering system

use super::camera::Viewport;
use super::{CameraUniform, TextureHandle, TextureManager, Vertex};
use crate::engine::assets::SheetRegion;
use anyhow::Result;
use glam::{Mat4, Vec2, Vec4};
use log::warn;
use std::collections::HashMap;
use std::ops::Range;
use wgpu::util::DeviceExt;

/// A textured quad to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Center in world space
    pub position: Vec2,
    /// Size in world units (width, height)
    pub size: Vec2,
    /// Top-left UV of the texture region
    pub uv_min: Vec2,
    /// Bottom-right UV of the texture region
    pub uv_max: Vec2,
    /// Color tint (RGBA, 1.0 = full color)
    pub color: Vec4,
    pub texture: TextureHandle,
}

impl Sprite {
    /// Create a sprite showing the whole texture
    pub fn new(position: Vec2, size: Vec2, texture: TextureHandle) -> Self {
        Self {
            position,
            size,
            uv_min: Vec2::ZERO,
            uv_max: Vec2::ONE,
            color: Vec4::ONE,
            texture,
        }
    }

    /// Create a sprite showing one region of a spritesheet
    pub fn from_region(
        position: Vec2,
        size: Vec2,
        region: &SheetRegion,
        texture: TextureHandle,
    ) -> Self {
        Self {
            uv_min: region.uv_min,
            uv_max: region.uv_max,
            ..Self::new(position, size, texture)
        }
    }

    /// Quad corners, counter-clockwise from the bottom-left
    pub fn vertices(&self) -> [Vertex; 4] {
        let half = self.size / 2.0;
        let (min, max) = (self.position - half, self.position + half);

        // Texture v grows downwards, world y grows upwards
        [
            Vertex::new(min, Vec2::new(self.uv_min.x, self.uv_max.y), self.color),
            Vertex::new(
                Vec2::new(max.x, min.y),
                Vec2::new(self.uv_max.x, self.uv_max.y),
                self.color,
            ),
            Vertex::new(max, Vec2::new(self.uv_max.x, self.uv_min.y), self.color),
            Vertex::new(
                Vec2::new(min.x, max.y),
                Vec2::new(self.uv_min.x, self.uv_min.y),
                self.color,
            ),
        ]
    }
}

/// A run of consecutive quads sharing one texture
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texture: TextureHandle,
    pub indices: Range<u32>,
}

/// CPU-side geometry for one frame
#[derive(Debug, Default)]
pub struct SpriteBatch {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub batches: Vec<Batch>,
}

impl SpriteBatch {
    /// Build quads for `sprites` in draw order
    ///
    /// Sprites entirely outside `viewport` are skipped. Neighbouring sprites
    /// with the same texture share a batch; order across textures is kept.
    pub fn build(sprites: &[Sprite], viewport: Option<&Viewport>) -> Self {
        let mut batch = Self::default();

        for sprite in sprites {
            if let Some(viewport) = viewport {
                if !viewport.intersects_rect(sprite.position, sprite.size / 2.0) {
                    continue;
                }
            }

            let base = batch.vertices.len() as u32;
            batch.vertices.extend_from_slice(&sprite.vertices());
            let start = batch.indices.len() as u32;
            batch
                .indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            let end = batch.indices.len() as u32;

            match batch.batches.last_mut() {
                Some(last) if last.texture == sprite.texture => last.indices.end = end,
                _ => batch.batches.push(Batch {
                    texture: sprite.texture,
                    indices: start..end,
                }),
            }
        }

        batch
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// GPU buffers of the frame being drawn
struct FrameBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    batches: Vec<Batch>,
}

/// Sprite renderer drawing per-texture batches of quads
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_groups: HashMap<TextureHandle, wgpu::BindGroup>,
    frame: Option<FrameBuffers>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Create camera bind group layout
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Create texture bind group layout
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            bind_group_layout: texture_bind_group_layout,
            texture_bind_groups: HashMap::new(),
            frame: None,
        })
    }

    /// Upload this frame's sprites
    ///
    /// Must be called before `render`, outside the render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        texture_manager: &TextureManager,
        sprites: &[Sprite],
        viewport: &Viewport,
    ) {
        let batch = SpriteBatch::build(sprites, Some(viewport));
        if batch.is_empty() {
            self.frame = None;
            return;
        }

        for b in &batch.batches {
            if self.texture_bind_groups.contains_key(&b.texture) {
                continue;
            }
            let Some(texture) = texture_manager.get(b.texture) else {
                warn!("Sprite uses unknown texture {:?}", b.texture);
                continue;
            };
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Texture Bind Group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            });
            self.texture_bind_groups.insert(b.texture, bind_group);
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&batch.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&batch.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.frame = Some(FrameBuffers {
            vertex_buffer,
            index_buffer,
            batches: batch.batches,
        });
    }

    /// Draw the sprites uploaded by the last `prepare`
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let Some(frame) = &self.frame else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, frame.vertex_buffer.slice(..));
        render_pass.set_index_buffer(frame.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for batch in &frame.batches {
            let Some(bind_group) = self.texture_bind_groups.get(&batch.texture) else {
                continue;
            };
            render_pass.set_bind_group(1, bind_group, &[]);
            render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
        }
    }

    /// Get a reference to the camera buffer
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }
}
