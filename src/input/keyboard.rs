use serde::{Deserialize, Serialize};

use crate::camera::core::CameraMovement;

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// move_forward = "KeyW"
/// quit = "Escape"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Fly along the look direction while held.
    MoveForward,
    /// Fly against the look direction while held.
    MoveBackward,
    /// Strafe left while held.
    StrafeLeft,
    /// Strafe right while held.
    StrafeRight,
    /// Restore the configured initial camera pose.
    ResetCamera,
    /// Close the viewer.
    Quit,
}

impl KeyAction {
    /// The continuous camera movement this action drives, if any.
    #[must_use]
    pub fn movement(self) -> Option<CameraMovement> {
        match self {
            Self::MoveForward => Some(CameraMovement::Forward),
            Self::MoveBackward => Some(CameraMovement::Backward),
            Self::StrafeLeft => Some(CameraMovement::Left),
            Self::StrafeRight => Some(CameraMovement::Right),
            Self::ResetCamera | Self::Quit => None,
        }
    }
}
