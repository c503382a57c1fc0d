use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::core::{
    Camera, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW,
    DEFAULT_ZOOM, PITCH_LIMIT,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Initial camera pose, control tuning and projection parameters.
pub struct CameraOptions {
    /// Initial eye position in world space.
    pub position: [f32; 3],
    /// World up reference vector.
    pub world_up: [f32; 3],
    /// Initial yaw in degrees.
    pub yaw: f32,
    /// Initial pitch in degrees. Clamped to `[-89, 89]` when
    /// `constrain_pitch` is set.
    pub pitch: f32,
    /// Movement speed in world units per second.
    pub movement_speed: f32,
    /// Mouse look sensitivity in degrees per pixel.
    pub mouse_sensitivity: f32,
    /// Initial vertical field of view in degrees (clamped to `[1, 45]`).
    pub zoom: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Clamp pitch to `[-89, 89]` degrees, both for the initial pose and
    /// while mouse-looking.
    pub constrain_pitch: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            world_up: [0.0, 1.0, 0.0],
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            znear: 0.1,
            zfar: 100.0,
            constrain_pitch: true,
        }
    }
}

impl CameraOptions {
    /// Build a camera in the configured initial pose.
    #[must_use]
    pub fn build_camera(&self) -> Camera {
        let pitch = if self.constrain_pitch {
            self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
        } else {
            self.pitch
        };
        Camera::with_orientation(
            Vec3::from_array(self.position),
            Vec3::from_array(self.world_up),
            self.yaw,
            pitch,
        )
        .with_movement_speed(self.movement_speed)
        .with_mouse_sensitivity(self.mouse_sensitivity)
        .with_zoom(self.zoom)
    }
}
