use glam::Vec2;
use rustc_hash::FxHashSet;

use super::event::InputEvent;
use crate::camera::core::CameraMovement;

/// Input gathered over one frame, ready to be applied to the camera.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Movement directions held at the end of the frame, in
    /// [`CameraMovement::ALL`] order.
    pub movements: Vec<CameraMovement>,
    /// Accumulated look delta in pixels. Positive x turns right, positive y
    /// looks up.
    pub cursor_delta: Vec2,
    /// Accumulated scroll delta in lines.
    pub scroll_delta: f32,
}

impl FrameInput {
    /// Whether applying this frame would leave the camera untouched.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.movements.is_empty()
            && self.cursor_delta == Vec2::ZERO
            && self.scroll_delta == 0.0
    }
}

/// Polled input state owned by the frame loop.
///
/// Window events are folded in as they arrive; the frame loop drains the
/// accumulated deltas once per frame with [`take_frame`](Self::take_frame).
/// Held keys persist across frames until released.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: FxHashSet<CameraMovement>,
    /// Last cursor position; `None` until the first sample so the first
    /// move contributes no delta.
    last_cursor: Option<Vec2>,
    cursor_delta: Vec2,
    scroll_delta: f32,
}

impl InputState {
    /// Create an empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a platform-agnostic event into the state. Key actions that do
    /// not drive movement are ignored here.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { action, pressed } => {
                if let Some(movement) = action.movement() {
                    self.handle_key(movement, pressed);
                }
            }
            InputEvent::CursorMoved { x, y } => self.handle_cursor(x, y),
            InputEvent::MouseMotion { dx, dy } => self.handle_motion(dx, dy),
            InputEvent::Scroll { delta } => self.handle_scroll(delta),
            InputEvent::FocusLost => self.release_all(),
        }
    }

    /// Record a movement key press or release.
    pub fn handle_key(&mut self, movement: CameraMovement, pressed: bool) {
        if pressed {
            let _ = self.held.insert(movement);
        } else {
            let _ = self.held.remove(&movement);
        }
    }

    /// Record an absolute cursor position.
    ///
    /// Window y grows downward while pitch grows upward, so the vertical
    /// delta is reversed.
    pub fn handle_cursor(&mut self, x: f32, y: f32) {
        let current = Vec2::new(x, y);
        if let Some(last) = self.last_cursor {
            self.cursor_delta += Vec2::new(current.x - last.x, last.y - current.y);
        }
        self.last_cursor = Some(current);
    }

    /// Record raw relative motion (cursor locked).
    pub fn handle_motion(&mut self, dx: f32, dy: f32) {
        self.cursor_delta += Vec2::new(dx, -dy);
    }

    /// Record a scroll-wheel delta.
    pub fn handle_scroll(&mut self, delta: f32) {
        self.scroll_delta += delta;
    }

    /// Drop held keys and forget the cursor, e.g. when focus is lost and
    /// release events may never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.last_cursor = None;
    }

    /// Whether a movement key is currently held.
    #[must_use]
    pub fn is_held(&self, movement: CameraMovement) -> bool {
        self.held.contains(&movement)
    }

    /// Last recorded cursor position, if any.
    #[must_use]
    pub fn last_cursor(&self) -> Option<Vec2> {
        self.last_cursor
    }

    /// Snapshot this frame's input and reset the accumulated deltas.
    pub fn take_frame(&mut self) -> FrameInput {
        let movements = CameraMovement::ALL
            .into_iter()
            .filter(|m| self.held.contains(m))
            .collect();
        FrameInput {
            movements,
            cursor_delta: std::mem::take(&mut self.cursor_delta),
            scroll_delta: std::mem::take(&mut self.scroll_delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn first_cursor_sample_seeds_without_delta() {
        let mut input = InputState::new();
        assert_eq!(input.last_cursor(), None);
        input.handle_cursor(400.0, 300.0);
        assert_eq!(input.last_cursor(), Some(Vec2::new(400.0, 300.0)));
        assert_eq!(input.take_frame().cursor_delta, Vec2::ZERO);
    }

    #[test]
    fn cursor_delta_reverses_y_and_accumulates() {
        let mut input = InputState::new();
        input.handle_cursor(100.0, 100.0);
        input.handle_cursor(110.0, 90.0);
        input.handle_cursor(115.0, 95.0);
        let frame = input.take_frame();
        // +15 right, net 5 pixels up the screen.
        assert_eq!(frame.cursor_delta, Vec2::new(15.0, 5.0));
    }

    #[test]
    fn take_frame_resets_deltas_but_keeps_keys() {
        let mut input = InputState::new();
        input.handle_key(CameraMovement::Forward, true);
        input.handle_scroll(2.0);
        input.handle_motion(3.0, 4.0);

        let first = input.take_frame();
        assert_eq!(first.movements, vec![CameraMovement::Forward]);
        assert_eq!(first.scroll_delta, 2.0);
        assert_eq!(first.cursor_delta, Vec2::new(3.0, -4.0));

        let second = input.take_frame();
        assert_eq!(second.movements, vec![CameraMovement::Forward]);
        assert_eq!(second.scroll_delta, 0.0);
        assert_eq!(second.cursor_delta, Vec2::ZERO);
    }

    #[test]
    fn movements_come_out_in_fixed_order() {
        let mut input = InputState::new();
        input.handle_key(CameraMovement::Right, true);
        input.handle_key(CameraMovement::Backward, true);
        input.handle_key(CameraMovement::Left, true);
        assert_eq!(
            input.take_frame().movements,
            vec![
                CameraMovement::Backward,
                CameraMovement::Left,
                CameraMovement::Right
            ]
        );
    }

    #[test]
    fn release_stops_movement() {
        let mut input = InputState::new();
        input.handle_key(CameraMovement::Left, true);
        assert!(input.is_held(CameraMovement::Left));
        input.handle_key(CameraMovement::Left, false);
        assert!(!input.is_held(CameraMovement::Left));
        assert!(input.take_frame().is_idle());
    }

    #[test]
    fn focus_loss_releases_keys_and_reseeds_cursor() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::Key {
            action: KeyAction::MoveForward,
            pressed: true,
        });
        input.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 });
        input.handle_event(InputEvent::FocusLost);
        assert!(!input.is_held(CameraMovement::Forward));
        assert_eq!(input.last_cursor(), None);

        // Re-entering far away must not produce a jump.
        input.handle_event(InputEvent::CursorMoved { x: 700.0, y: 20.0 });
        assert_eq!(input.take_frame().cursor_delta, Vec2::ZERO);
    }

    #[test]
    fn non_movement_actions_are_ignored() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::Key {
            action: KeyAction::Quit,
            pressed: true,
        });
        input.handle_event(InputEvent::Key {
            action: KeyAction::ResetCamera,
            pressed: true,
        });
        assert!(input.take_frame().is_idle());
    }
}
