//! Standalone fly-through window backed by winit.
//!
//! ```no_run
//! # use flycam::Viewer;
//! Viewer::builder()
//!     .with_title("Cubes")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    error::FlycamError, options::Options, util::frame_timing::FrameTiming,
    FlyEngine, InputEvent,
};

/// Lines per pixel for trackpad scrolling, so a typical swipe zooms about
/// as far as one wheel notch.
const PIXELS_TO_LINES: f32 = 0.01;

/// Frames between debug FPS reports.
const FPS_LOG_INTERVAL: u64 = 300;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    title: Option<String>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title, overriding `options.window.title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options;
        if let Some(title) = self.title {
            options.window.title = title;
        }
        Viewer { options }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that flies through the cube scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or `Quit` is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Viewer`] if the event loop or window cannot be
    /// created, and any engine initialization error.
    pub fn run(self) -> Result<(), FlycamError> {
        let event_loop =
            EventLoop::new().map_err(|e| FlycamError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            frame_timing: FrameTiming::new(self.options.window.target_fps),
            cursor_locked: false,
            options: Some(self.options),
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| FlycamError::Viewer(e.to_string()))?;

        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<FlyEngine>,
    frame_timing: FrameTiming,
    /// Raw device motion drives the look while the cursor is locked;
    /// otherwise absolute cursor positions do.
    cursor_locked: bool,
    /// Taken when the engine is built.
    options: Option<Options>,
    /// First fatal error, reported once the event loop returns.
    error: Option<FlycamError>,
}

/// Lock the cursor for relative motion, falling back to confining it.
/// Returns `true` when locked.
fn grab_cursor(window: &Window) -> bool {
    let locked = match window.set_cursor_grab(CursorGrabMode::Locked) {
        Ok(()) => true,
        Err(locked_err) => {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined) {
                log::warn!(
                    "cursor grab unavailable (locked: {locked_err}, confined: {e})"
                );
            }
            false
        }
    };
    window.set_cursor_visible(false);
    locked
}

/// Vertical scroll in wheel lines.
fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * PIXELS_TO_LINES,
    }
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: FlycamError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let (Some(engine), Some(window)) = (&mut self.engine, &self.window)
        else {
            return;
        };
        if self.frame_timing.should_render() {
            let dt = self.frame_timing.tick();
            if self.frame_timing.is_nth_frame(FPS_LOG_INTERVAL) {
                log::debug!(
                    "{:.1} fps ({} frames)",
                    self.frame_timing.fps(),
                    self.frame_timing.frame_count()
                );
            }
            engine.update(dt);
            match engine.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    let inner = window.inner_size();
                    engine.resize(inner.width, inner.height);
                }
                Err(e) => log::error!("render error: {e:?}"),
            }
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(&options.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                options.window.width,
                options.window.height,
            ))
            .with_resizable(options.window.resizable);

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, FlycamError::Viewer(e.to_string()));
                return;
            }
        };

        if options.window.grab_cursor {
            self.cursor_locked = grab_cursor(&window);
        }

        let inner = window.inner_size();
        let target_fps = options.window.target_fps;
        let engine = match pollster::block_on(FlyEngine::new(
            window.clone(),
            (inner.width, inner.height),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        // Start timing now so startup is not reported as the first dt.
        self.frame_timing = FrameTiming::new(target_fps);
        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => engine.resize(size.width, size.height),

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                if engine.handle_key(&format!("{code:?}"), pressed) {
                    event_loop.exit();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if !self.cursor_locked {
                    let _ = engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let _ = engine.handle_input(InputEvent::Scroll {
                    delta: scroll_lines(delta),
                });
            }

            WindowEvent::Focused(false) => {
                let _ = engine.handle_input(InputEvent::FocusLost);
            }

            WindowEvent::Focused(true) => {
                if let (Some(window), true) =
                    (&self.window, engine.options().window.grab_cursor)
                {
                    self.cursor_locked = grab_cursor(window);
                }
            }

            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if !self.cursor_locked {
            return;
        }
        if let (DeviceEvent::MouseMotion { delta }, Some(engine)) =
            (event, &mut self.engine)
        {
            let _ = engine.handle_input(InputEvent::MouseMotion {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;

    use super::*;

    #[test]
    fn wheel_lines_pass_through() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(3.0, -2.0)), -2.0);
    }

    #[test]
    fn trackpad_pixels_scale_to_lines() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 250.0));
        assert!((scroll_lines(delta) - 2.5).abs() < 1e-6);
    }
}
