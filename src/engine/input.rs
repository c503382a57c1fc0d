//! Input entry points for FlyEngine

use super::FlyEngine;
use crate::input::InputEvent;

impl FlyEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Movement keys, cursor and scroll are accumulated in the polled
    /// [`InputState`](crate::input::InputState) and applied on the next
    /// [`update`](Self::update). `ResetCamera` acts immediately on press.
    ///
    /// Returns `true` when the event asks the viewer to exit (`Quit`
    /// pressed).
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.camera_controller.handle_event(&mut self.input, event)
    }

    /// Resolve a physical key string (`winit::keyboard::KeyCode` debug
    /// format, e.g. `"KeyW"`) through the key bindings and handle it.
    ///
    /// Unbound keys are ignored. Returns `true` when exit is requested.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match self.options.keybindings.lookup(key) {
            Some(action) => self.handle_input(InputEvent::Key { action, pressed }),
            None => false,
        }
    }
}
