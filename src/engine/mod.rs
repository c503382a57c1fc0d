//! The fly-through viewer engine: GPU context, camera, input and the cube
//! pass, driven one frame at a time.

mod input;

use crate::camera::controller::CameraController;
use crate::camera::core::Camera;
use crate::error::FlycamError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::{DepthTexture, ImageData};
use crate::input::InputState;
use crate::options::Options;
use crate::renderer::cube::cube_instances;
use crate::renderer::cube_pass::{CubeRenderer, CubeTextures};

/// The fly-through cube viewer engine.
///
/// Owns the GPU context, the camera controller, polled input state and the
/// cube renderer.
///
/// # Frame loop
///
/// Forward window input with [`handle_input`](Self::handle_input) as it
/// arrives. Once per frame call [`update`](Self::update) with the elapsed
/// seconds, then [`render`](Self::render) to draw and present. Call
/// [`resize`](Self::resize) when the window size changes.
pub struct FlyEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    /// Fly camera and its uniform buffer.
    pub camera_controller: CameraController,
    /// Keys and cursor deltas accumulated since the last update.
    input: InputState,
    cube_renderer: CubeRenderer,
    depth: DepthTexture,
    options: Options,
    /// Seconds accumulated through [`update`](Self::update); drives the spin.
    elapsed: f32,
}

impl FlyEngine {
    /// Create the engine for a window surface.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Gpu`] if the GPU cannot be initialized,
    /// [`FlycamError::Texture`] if a configured texture fails to load, and
    /// [`FlycamError::Shader`] if shader composition fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, FlycamError> {
        let base = ImageData::load_or_else(
            options.scene.base_texture.as_deref(),
            ImageData::default_base,
        )?;
        let overlay = ImageData::load_or_else(
            options.scene.overlay_texture.as_deref(),
            ImageData::default_overlay,
        )?;

        let context = RenderContext::new(window, size).await?;
        let mut shader_composer = ShaderComposer::new()?;

        let camera_controller =
            CameraController::new(&context, &options.camera);
        let mut cube_renderer = CubeRenderer::new(
            &context,
            &camera_controller.layout,
            &mut shader_composer,
            &CubeTextures {
                base: &base,
                overlay: &overlay,
                mix: options.scene.texture_mix,
            },
        )?;
        cube_renderer.write_instances(
            &context.device,
            &context.queue,
            &cube_instances(&options.scene, 0.0),
        );

        let (width, height) = context.size();
        let depth = DepthTexture::new(&context.device, width, height);

        log::info!(
            "engine ready: {width}x{height}, {} cubes",
            cube_renderer.instance_count()
        );

        Ok(Self {
            context,
            camera_controller,
            input: InputState::new(),
            cube_renderer,
            depth,
            options,
            elapsed: 0.0,
        })
    }

    /// Advance one frame: apply polled input to the camera, then upload the
    /// camera uniform and cube transforms.
    pub fn update(&mut self, dt: f32) {
        let frame = self.camera_controller.apply_input(&mut self.input, dt);
        if !frame.is_idle() {
            log::trace!("frame input: {frame:?}");
        }
        self.elapsed += dt;

        self.camera_controller.update_gpu(&self.context.queue);
        self.cube_renderer.write_instances(
            &self.context.device,
            &self.context.queue,
            &cube_instances(&self.options.scene, self.elapsed),
        );
    }

    /// Draw the cubes and present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next frame cannot be acquired.
    /// `Outdated` and `Lost` are recovered by calling
    /// [`resize`](Self::resize) with the window size.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let [r, g, b] = self.options.scene.clear_color;
        let mut encoder = self.context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Cube Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            depth_slice: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            self.cube_renderer
                .draw(&mut render_pass, &self.camera_controller.bind_group);
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Resize the surface, depth buffer and projection. Zero-sized
    /// dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera_controller.resize(width, height);
        self.depth = DepthTexture::new(&self.context.device, width, height);
        log::debug!("resized to {width}x{height}");
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The fly camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera_controller.camera
    }

    /// Input accumulated since the last [`update`](Self::update).
    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Seconds of simulated time so far.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
