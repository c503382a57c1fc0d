use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where each cube sits in the world, in draw order.
const CUBE_POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Scene content: cube layout, animation and textures.
pub struct SceneOptions {
    /// Background clear color, RGB in `[0, 1]`.
    pub clear_color: [f32; 3],
    /// World-space cube centers. One cube is drawn per entry.
    pub cube_positions: Vec<[f32; 3]>,
    /// Axis every cube spins around (normalized at use).
    pub rotation_axis: [f32; 3],
    /// Extra rotation per cube index, in degrees.
    pub rotation_step_degrees: f32,
    /// Spin the cubes over time (one radian per second).
    pub spin: bool,
    /// Base texture image. A procedural checkerboard is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_texture: Option<PathBuf>,
    /// Overlay texture image. A procedural dot pattern is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_texture: Option<PathBuf>,
    /// Overlay weight in the final blend (0 = base only, 1 = overlay
    /// only).
    pub texture_mix: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3],
            cube_positions: CUBE_POSITIONS.to_vec(),
            rotation_axis: [1.0, 0.3, 0.5],
            rotation_step_degrees: 20.0,
            spin: true,
            base_texture: None,
            overlay_texture: None,
            texture_mix: 0.2,
        }
    }
}
