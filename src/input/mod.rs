//! Input handling: platform-agnostic events, polled per-frame state, and
//! the update step that applies a frame of input to the camera.

/// Platform-agnostic input events.
pub mod event;
/// Bindable viewer actions.
pub mod keyboard;
/// Applies a frame of input to the camera.
pub mod processor;
/// Polled key and cursor state.
pub mod state;

pub use event::InputEvent;
pub use keyboard::KeyAction;
pub use processor::{dispatch, update};
pub use state::{FrameInput, InputState};
