use super::keyboard::KeyAction;

/// Platform-agnostic input events.
///
/// The windowing layer resolves physical keys through the key bindings and
/// forwards everything else as raw positions or deltas. Events are fed to
/// [`InputState::handle_event`](super::InputState::handle_event), which
/// accumulates them until the next frame.
///
/// # Example
///
/// ```
/// use flycam::input::{InputEvent, InputState, KeyAction};
///
/// let mut input = InputState::new();
/// input.handle_event(InputEvent::Key {
///     action: KeyAction::MoveForward,
///     pressed: true,
/// });
/// input.handle_event(InputEvent::Scroll { delta: 1.0 });
/// assert_eq!(input.take_frame().scroll_delta, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A bound key changed state.
    Key {
        /// The action the key is bound to.
        action: KeyAction,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Cursor moved to absolute window position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels (grows downward).
        y: f32,
    },
    /// Raw relative mouse motion, used while the cursor is locked.
    MouseMotion {
        /// Horizontal delta in device units.
        dx: f32,
        /// Vertical delta in device units (grows downward).
        dy: f32,
    },
    /// Scroll wheel (positive = away from the user, zooms in).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// The window lost keyboard/mouse focus.
    FocusLost,
}
