use glam::{Mat4, Vec3};

/// Default yaw in degrees. -90 points the camera down -Z.
pub const DEFAULT_YAW: f32 = -90.0;
/// Default pitch in degrees.
pub const DEFAULT_PITCH: f32 = 0.0;
/// Default movement speed in world units per second.
pub const DEFAULT_SPEED: f32 = 5.0;
/// Default mouse sensitivity in degrees per pixel.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Default (and widest) zoom, as vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch is kept within `[-PITCH_LIMIT, PITCH_LIMIT]` degrees when
/// constrained, so the look direction never flips over the pole.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view in degrees.
pub const ZOOM_MIN: f32 = 1.0;
/// Widest field of view in degrees.
pub const ZOOM_MAX: f32 = 45.0;

/// Direction of a keyboard-driven camera displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along the look direction.
    Forward,
    /// Against the look direction.
    Backward,
    /// Against the right vector.
    Left,
    /// Along the right vector.
    Right,
}

impl CameraMovement {
    /// Every direction, in the order they are applied within a frame.
    pub const ALL: [Self; 4] =
        [Self::Forward, Self::Backward, Self::Left, Self::Right];
}

/// Free-fly camera driven by Euler angles.
///
/// `front`, `right` and `up` are never set directly: they are derived from
/// `yaw`, `pitch` and `world_up` every time the orientation changes, which
/// keeps them an orthonormal basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Create a camera at `position` looking down -Z with a +Y world up.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }

    /// Create a camera with an explicit world up vector and Euler angles
    /// (degrees). `world_up` is normalized; pitch is stored as given.
    #[must_use]
    pub fn with_orientation(
        position: Vec3,
        world_up: Vec3,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        let world_up = world_up.try_normalize().unwrap_or(Vec3::Y);
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_camera_vectors();
        camera
    }

    /// Set the movement speed (world units per second).
    #[must_use]
    pub fn with_movement_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    /// Set the mouse sensitivity (degrees per pixel).
    #[must_use]
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Set the initial zoom, clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        self
    }

    /// Displace the camera by `movement_speed * delta_time` along the
    /// requested direction. `delta_time` is taken as is.
    pub fn process_keyboard(
        &mut self,
        direction: CameraMovement,
        delta_time: f32,
    ) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Turn the camera by a cursor delta in pixels.
    ///
    /// Positive `x_offset` turns right, positive `y_offset` looks up. With
    /// `constrain_pitch` the pitch is clamped to `[-89, 89]` degrees.
    pub fn process_mouse_movement(
        &mut self,
        x_offset: f32,
        y_offset: f32,
        constrain_pitch: bool,
    ) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    /// Zoom by a scroll-wheel delta. Scrolling up (positive) narrows the
    /// field of view.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Right-handed view matrix looking from `position` along `front`.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Right-handed perspective projection using `zoom` as the vertical
    /// field of view. Depth maps to `[0, 1]` (wgpu convention).
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, znear, zfar)
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport the camera without changing its orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Unit look direction.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit up direction, orthogonal to `front` and `right`.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Fixed world up reference.
    #[must_use]
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees (unbounded).
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Movement speed in world units per second.
    #[must_use]
    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    /// Mouse sensitivity in degrees per pixel.
    #[must_use]
    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    /// Vertical field of view in degrees, within `[ZOOM_MIN, ZOOM_MAX]`.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Recompute the basis from the Euler angles.
    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalize();
        // Looking straight along world up leaves right undefined; keep the
        // previous one so the basis stays finite.
        self.right = self
            .front
            .cross(self.world_up)
            .try_normalize()
            .unwrap_or(self.right);
        self.up = self.right.cross(self.front).normalize();
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            fovy: DEFAULT_ZOOM,
        }
    }

    /// Update uniform fields from the camera and its projection parameters.
    pub fn update_view_proj(
        &mut self,
        camera: &Camera,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) {
        let view_proj =
            camera.projection_matrix(aspect, znear, zfar) * camera.view_matrix();
        self.view_proj = view_proj.to_cols_array_2d();
        self.position = camera.position().to_array();
        self.fovy = camera.zoom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_vec_near(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPS),
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn assert_orthonormal(camera: &Camera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        assert!((f.length() - 1.0).abs() < EPS, "front {f:?}");
        assert!((r.length() - 1.0).abs() < EPS, "right {r:?}");
        assert!((u.length() - 1.0).abs() < EPS, "up {u:?}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.zoom(), 45.0);
        assert_vec_near(camera.front(), Vec3::NEG_Z);
        assert_vec_near(camera.right(), Vec3::X);
        assert_vec_near(camera.up(), Vec3::Y);
    }

    #[test]
    fn view_matrix_matches_look_at() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        let expected = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::Y,
        );
        assert!(camera.view_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let eye = camera.view_matrix().transform_point3(camera.position());
        assert_vec_near(eye, Vec3::ZERO);
        // A point straight ahead ends up on the -Z axis in view space.
        let ahead = camera
            .view_matrix()
            .transform_point3(camera.position() + camera.front() * 2.0);
        assert_vec_near(ahead, Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn basis_stays_orthonormal_across_mouse_moves() {
        let mut camera = Camera::new(Vec3::ZERO);
        let deltas = [
            (13.0, 7.0),
            (-250.0, 40.0),
            (900.0, -1200.0),
            (0.5, 0.25),
            (-37.0, 600.0),
            (3600.0, -3.0),
        ];
        for (dx, dy) in deltas {
            camera.process_mouse_movement(dx, dy, true);
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn constrained_pitch_stays_in_range() {
        let mut camera = Camera::new(Vec3::ZERO);
        for step in 0..200 {
            let dy = if step % 3 == 0 { -750.0 } else { 512.0 };
            camera.process_mouse_movement(1.0, dy, true);
            assert!(camera.pitch() >= -PITCH_LIMIT);
            assert!(camera.pitch() <= PITCH_LIMIT);
        }
        camera.process_mouse_movement(0.0, 10_000.0, true);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        camera.process_mouse_movement(0.0, -10_000.0, true);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn unconstrained_pitch_is_unbounded() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_mouse_movement(0.0, 1500.0, false);
        assert!((camera.pitch() - 150.0).abs() < EPS);
        assert!(camera.front().is_finite());
        assert!(camera.up().is_finite());
    }

    #[test]
    fn straight_up_keeps_a_finite_basis() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_mouse_movement(0.0, 900.0, false);
        assert!((camera.pitch() - 90.0).abs() < EPS);
        assert!(camera.right().is_finite());
        assert!(camera.up().is_finite());
        assert!((camera.right().length() - 1.0).abs() < EPS);
        assert!(camera.right().dot(Vec3::Y).abs() < EPS);
    }

    #[test]
    fn yaw_accumulates_without_wrapping() {
        let mut camera = Camera::new(Vec3::ZERO);
        for _ in 0..10 {
            camera.process_mouse_movement(1000.0, 0.0, true);
        }
        assert!((camera.yaw() - (DEFAULT_YAW + 1000.0)).abs() < 1e-2);
    }

    #[test]
    fn scroll_reduces_zoom_and_clamps() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_mouse_scroll(10.0);
        assert_eq!(camera.zoom(), 35.0);
        for _ in 0..3 {
            camera.process_mouse_scroll(10.0);
        }
        assert_eq!(camera.zoom(), ZOOM_MIN);

        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom(), ZOOM_MAX);
    }

    #[test]
    fn scroll_is_monotonic_before_clamping() {
        let mut smaller = Camera::new(Vec3::ZERO);
        let mut larger = Camera::new(Vec3::ZERO);
        smaller.process_mouse_scroll(2.0);
        larger.process_mouse_scroll(5.0);
        assert!(larger.zoom() < smaller.zoom());
    }

    #[test]
    fn forward_then_backward_restores_position() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        camera.process_mouse_movement(123.0, -45.0, true);
        let start = camera.position();
        camera.process_keyboard(CameraMovement::Forward, 0.016);
        assert!(camera.position() != start);
        camera.process_keyboard(CameraMovement::Backward, 0.016);
        assert_vec_near(camera.position(), start);

        camera.process_keyboard(CameraMovement::Left, 0.3);
        camera.process_keyboard(CameraMovement::Right, 0.3);
        assert_vec_near(camera.position(), start);
    }

    #[test]
    fn strafe_right_moves_along_positive_x() {
        let mut camera = Camera::new(Vec3::ZERO).with_movement_speed(5.0);
        let strafe = camera.front().cross(camera.up()).normalize();
        assert_vec_near(strafe, Vec3::X);

        camera.process_keyboard(CameraMovement::Right, 1.0);
        assert_vec_near(camera.position(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn forward_follows_look_direction() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        assert_vec_near(camera.position(), Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn delta_time_is_not_validated() {
        let mut camera = Camera::new(Vec3::ZERO).with_movement_speed(2.0);
        camera.process_keyboard(CameraMovement::Forward, -1.0);
        assert_vec_near(camera.position(), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn uniform_combines_projection_and_view() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, 4.0 / 3.0, 0.1, 100.0);

        let expected = camera.projection_matrix(4.0 / 3.0, 0.1, 100.0)
            * camera.view_matrix();
        let actual = Mat4::from_cols_array_2d(&uniform.view_proj);
        assert!(actual.abs_diff_eq(expected, EPS));
        assert_eq!(uniform.position, [0.0, 0.0, 3.0]);
        assert_eq!(uniform.fovy, 45.0);
    }

    #[test]
    fn uniform_layout_is_std140_friendly() {
        assert_eq!(size_of::<CameraUniform>(), 80);
    }
}
