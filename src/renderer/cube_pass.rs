//! Textured, instanced cube pass.
//!
//! One static vertex buffer holds the unit cube; one instance buffer holds a
//! model matrix per cube. The fragment shader blends a base and an overlay
//! texture.
//!
//! Bind group convention:
//! - group(0): camera uniform
//! - group(1): base texture, overlay texture, sampler, material uniform

use wgpu::util::DeviceExt;

use super::cube::{CubeInstance, CubeVertex, CUBE_VERTICES};
use super::pipeline_util;
use crate::error::FlycamError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, TEXTURED_CUBE_SHADER};
use crate::gpu::texture::{ImageData, Texture2d};

/// Must match `MaterialUniform` in `textured_cube.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniform {
    texture_mix: f32,
    _pad: [f32; 3],
}

impl MaterialUniform {
    fn new(texture_mix: f32) -> Self {
        Self {
            texture_mix: texture_mix.clamp(0.0, 1.0),
            _pad: [0.0; 3],
        }
    }
}

/// Images sampled by the cube shader.
pub struct CubeTextures<'a> {
    /// Base surface image.
    pub base: &'a ImageData,
    /// Image blended over the base.
    pub overlay: &'a ImageData,
    /// Overlay weight in `[0, 1]`.
    pub mix: f32,
}

/// Draws every cube instance in one instanced draw call.
pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instance_count: u32,
    texture_bind_group: wgpu::BindGroup,
    _textures: [Texture2d; 2],
}

impl CubeRenderer {
    /// Upload geometry and textures and build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Shader`] if the cube shader fails to compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
        textures: &CubeTextures<'_>,
    ) -> Result<Self, FlycamError> {
        let device = &context.device;

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let instance_capacity = 1;
        let instance_buffer = Self::create_instance_buffer(device, instance_capacity);

        let material_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Material Buffer"),
                contents: bytemuck::cast_slice(&[MaterialUniform::new(
                    textures.mix,
                )]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let base = Texture2d::from_image(
            device,
            &context.queue,
            "Cube Base Texture",
            textures.base,
        );
        let overlay = Texture2d::from_image(
            device,
            &context.queue,
            "Cube Overlay Texture",
            textures.overlay,
        );
        let sampler = pipeline_helpers::repeat_sampler(device, "Cube Sampler");

        let texture_layout = Self::create_texture_layout(device);
        let texture_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Cube Texture Bind Group"),
                layout: &texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&base.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &overlay.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: material_buffer.as_entire_binding(),
                    },
                ],
            });

        let pipeline = Self::create_pipeline(
            context,
            camera_layout,
            &texture_layout,
            shader_composer,
        )?;

        Ok(Self {
            pipeline,
            vertex_buffer,
            instance_buffer,
            instance_capacity,
            instance_count: 0,
            texture_bind_group,
            _textures: [base, overlay],
        })
    }

    fn create_instance_buffer(
        device: &wgpu::Device,
        capacity: usize,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cube Instance Buffer"),
            size: (capacity.max(1) * size_of::<CubeInstance>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cube Texture Layout"),
            entries: &[
                pipeline_helpers::texture_2d(0),
                pipeline_helpers::texture_2d(1),
                pipeline_helpers::filtering_sampler(2),
                pipeline_helpers::uniform_buffer(
                    3,
                    wgpu::ShaderStages::FRAGMENT,
                ),
            ],
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
    ) -> Result<wgpu::RenderPipeline, FlycamError> {
        let shader = shader_composer.compose(
            &context.device,
            "Textured Cube Shader",
            TEXTURED_CUBE_SHADER,
            "raster/textured_cube.wgsl",
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Textured Cube Pipeline Layout"),
                bind_group_layouts: &[camera_layout, texture_layout],
                push_constant_ranges: &[],
            },
        );

        Ok(context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Textured Cube Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[CubeVertex::layout(), CubeInstance::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(pipeline_util::color_target(
                        context.format(),
                    ))],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            }))
    }

    /// Replace the instance transforms, growing the buffer when needed.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[CubeInstance],
    ) {
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer =
                Self::create_instance_buffer(device, self.instance_capacity);
            log::debug!(
                "cube instance buffer grown to {} instances",
                self.instance_capacity
            );
        }
        if !instances.is_empty() {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(instances),
            );
        }
        self.instance_count = instances.len() as u32;
    }

    /// Number of cubes drawn per frame.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Record the instanced draw into `render_pass`.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.draw(0..CUBE_VERTICES.len() as u32, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_uniform_is_16_bytes_and_clamped() {
        assert_eq!(size_of::<MaterialUniform>(), 16);
        assert_eq!(MaterialUniform::new(0.2).texture_mix, 0.2);
        assert_eq!(MaterialUniform::new(-1.0).texture_mix, 0.0);
        assert_eq!(MaterialUniform::new(3.0).texture_mix, 1.0);
    }
}
