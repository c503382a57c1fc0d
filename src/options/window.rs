use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Window creation parameters.
pub struct WindowOptions {
    /// Inner width in logical pixels.
    pub width: u32,
    /// Inner height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Whether the user may resize the window.
    pub resizable: bool,
    /// Hide and lock the cursor to the window for mouse look.
    pub grab_cursor: bool,
    /// Frame-rate cap (0 = unlimited, present mode still applies vsync).
    pub target_fps: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Flycam".into(),
            resizable: false,
            grab_cursor: true,
            target_fps: 0,
        }
    }
}
