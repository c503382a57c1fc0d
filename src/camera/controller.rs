use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::input::{self, FrameInput, InputEvent, InputState};
use crate::options::CameraOptions;

/// Owns the fly camera together with its projection parameters and the GPU
/// uniform it is mirrored into.
pub struct CameraController {
    /// The camera being driven.
    pub camera: Camera,
    /// CPU copy of the uniform last written to [`buffer`](Self::buffer).
    pub uniform: CameraUniform,
    /// Uniform buffer bound at group 0.
    pub buffer: wgpu::Buffer,
    /// Layout for the camera bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing [`buffer`](Self::buffer).
    pub bind_group: wgpu::BindGroup,

    options: CameraOptions,
    aspect: f32,
}

impl CameraController {
    /// Build the camera from `options` and allocate its GPU resources.
    #[must_use]
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let camera = options.build_camera();
        let aspect = context.aspect();

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, aspect, options.znear, options.zfar);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            });

        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
            options: options.clone(),
            aspect,
        }
    }

    /// Apply one frame of polled input over `dt` seconds.
    pub fn apply_input(&mut self, state: &mut InputState, dt: f32) -> FrameInput {
        input::update(&mut self.camera, state, dt, self.options.constrain_pitch)
    }

    /// Recompute the uniform and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(
            &self.camera,
            self.aspect,
            self.options.znear,
            self.options.zfar,
        );
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    /// Track a new surface size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Route an input event, resetting to the configured pose on
    /// `ResetCamera`. Returns `true` when `Quit` is pressed.
    pub fn handle_event(&mut self, state: &mut InputState, event: InputEvent) -> bool {
        input::dispatch(&mut self.camera, state, &self.options, event)
    }

    /// Current width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Projection parameters and reset pose this controller was built with.
    #[must_use]
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }
}
