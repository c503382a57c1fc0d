//! Centralized viewer options with TOML file support.
//!
//! Window, camera, scene and key-binding settings live here. Every section
//! uses `#[serde(default)]`, so a TOML file only needs the values it wants
//! to change.

mod camera;
mod keybindings;
mod scene;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::FlycamError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Window creation parameters.
    pub window: WindowOptions,
    /// Camera pose, control tuning and projection.
    pub camera: CameraOptions,
    /// Cube layout, animation and textures.
    pub scene: SceneOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Io`] if the file cannot be read and
    /// [`FlycamError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, FlycamError> {
        let content = std::fs::read_to_string(path).map_err(FlycamError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, FlycamError> {
        toml::from_str(content)
            .map_err(|e| FlycamError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::OptionsParse`] if serialization fails and
    /// [`FlycamError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), FlycamError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlycamError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(FlycamError::Io)?;
        }
        std::fs::write(path, content).map_err(FlycamError::Io)
    }
}
