//! Applies one frame of polled input to a [`Camera`].
//!
//! This is the single place where the accumulated [`InputState`] meets the
//! camera. The frame loop calls [`update`] once per frame with the elapsed
//! time; held keys translate the camera, the cursor delta turns it and the
//! scroll delta zooms it.

use super::event::InputEvent;
use super::keyboard::KeyAction;
use super::state::{FrameInput, InputState};
use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Route one event: act on `ResetCamera` and `Quit` right away, fold
/// everything else into `input` for the next [`update`].
///
/// Reset rebuilds `camera` from `options` and drops pending look and zoom
/// deltas; held keys stay held. Returns `true` when `Quit` is pressed.
pub fn dispatch(
    camera: &mut Camera,
    input: &mut InputState,
    options: &CameraOptions,
    event: InputEvent,
) -> bool {
    match event {
        InputEvent::Key {
            action: KeyAction::Quit,
            pressed,
        } => pressed,
        InputEvent::Key {
            action: KeyAction::ResetCamera,
            pressed: true,
        } => {
            *camera = options.build_camera();
            let _ = input.take_frame();
            log::debug!("camera reset to {:?}", camera.position());
            false
        }
        _ => {
            input.handle_event(event);
            false
        }
    }
}

/// Drain `input` and apply it to `camera` over `dt` seconds.
///
/// Movements are applied in [`CameraMovement::ALL`] order so that
/// simultaneous keys give a deterministic result. A zero cursor or scroll
/// delta leaves orientation and zoom untouched.
///
/// Returns the frame that was applied.
///
/// [`CameraMovement::ALL`]: crate::camera::core::CameraMovement::ALL
pub fn update(
    camera: &mut Camera,
    input: &mut InputState,
    dt: f32,
    constrain_pitch: bool,
) -> FrameInput {
    let frame = input.take_frame();
    apply_frame(camera, &frame, dt, constrain_pitch);
    frame
}

/// Apply an already-drained frame to `camera`.
pub fn apply_frame(
    camera: &mut Camera,
    frame: &FrameInput,
    dt: f32,
    constrain_pitch: bool,
) {
    for &movement in &frame.movements {
        camera.process_keyboard(movement, dt);
    }
    if frame.cursor_delta != glam::Vec2::ZERO {
        camera.process_mouse_movement(
            frame.cursor_delta.x,
            frame.cursor_delta.y,
            constrain_pitch,
        );
    }
    if frame.scroll_delta != 0.0 {
        camera.process_mouse_scroll(frame.scroll_delta);
    }
}
