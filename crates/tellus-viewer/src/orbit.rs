//! Orbit camera: drag to rotate around the planet, scroll to zoom.

use glam::{Mat4, Vec3};
use tellus_render::perspective_reversed_z;

/// Near plane for the reverse-Z projection.
const NEAR: f32 = 0.1;
/// Far plane for the reverse-Z projection.
const FAR: f32 = 200.0;
/// Pitch limit keeping the camera off the poles.
const MAX_PITCH: f32 = 1.5;
/// Exponential smoothing rate toward the target orientation.
const DAMPING: f32 = 8.0;

/// Camera orbiting the planet at the origin.
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    min_distance: f32,
    max_distance: f32,
    fov_y: f32,
    aspect_ratio: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitCamera {
    /// Create a camera at the given starting position looking at the origin.
    pub fn new(position: Vec3, fov_y: f32, min_distance: f32, max_distance: f32) -> Self {
        let distance = position.length().max(min_distance);
        let yaw = position.z.atan2(position.x);
        let pitch = (position.y / distance).clamp(-1.0, 1.0).asin();

        Self {
            yaw,
            pitch,
            distance,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
            min_distance,
            max_distance,
            fov_y,
            aspect_ratio: 1.0,
            dragging: false,
            last_cursor: None,
        }
    }

    /// Update the aspect ratio after a resize.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        self.aspect_ratio = width as f32 / height.max(1) as f32;
    }

    /// Begin or end a drag.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        if !dragging {
            self.last_cursor = None;
        }
    }

    /// Feed a cursor position; orbits while a drag is active.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        if self.dragging
            && let Some((last_x, last_y)) = self.last_cursor
        {
            let dx = (x - last_x) as f32;
            let dy = (y - last_y) as f32;
            self.target_yaw += dx * 0.005;
            self.target_pitch = (self.target_pitch + dy * 0.005).clamp(-MAX_PITCH, MAX_PITCH);
        }
        self.last_cursor = Some((x, y));
    }

    /// Zoom by scroll lines; positive moves the camera closer.
    pub fn on_scroll(&mut self, lines: f32) {
        self.target_distance =
            (self.target_distance * (1.0 - lines * 0.1)).clamp(self.min_distance, self.max_distance);
    }

    /// Advance the smoothed orientation toward its targets.
    pub fn update(&mut self, dt: f32) {
        let t = (dt * DAMPING).min(1.0);
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        self.distance += (self.target_distance - self.distance) * t;
    }

    /// Current eye position in world space.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.sin(),
        ) * self.distance
    }

    /// Combined view-projection matrix for the current orientation.
    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        let proj = perspective_reversed_z(self.fov_y, self.aspect_ratio, NEAR, FAR);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_eye_matches_position() {
        let start = Vec3::new(12.0, 5.0, 4.0);
        let camera = OrbitCamera::new(start, 25_f32.to_radians(), 1.5, 60.0);
        let eye = camera.eye();
        assert!(
            (eye - start).length() < 1e-3,
            "spherical decomposition must reproduce the start position, got {eye:?}"
        );
    }

    #[test]
    fn test_zoom_clamps_to_range() {
        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 1.5, 60.0);
        for _ in 0..100 {
            camera.on_scroll(5.0);
        }
        camera.update(10.0);
        assert!(camera.eye().length() >= 1.5 - 1e-4);

        for _ in 0..100 {
            camera.on_scroll(-5.0);
        }
        camera.update(10.0);
        assert!(camera.eye().length() <= 60.0 + 1e-3);
    }

    #[test]
    fn test_drag_orbits_only_while_pressed() {
        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 1.5, 60.0);
        let before = camera.target_yaw;

        camera.on_cursor_moved(100.0, 100.0);
        camera.on_cursor_moved(200.0, 100.0);
        assert_eq!(camera.target_yaw, before, "no drag, no orbit");

        camera.set_dragging(true);
        camera.on_cursor_moved(200.0, 100.0);
        camera.on_cursor_moved(300.0, 100.0);
        assert!(camera.target_yaw != before, "dragging orbits the camera");
    }

    #[test]
    fn test_pitch_stays_off_the_poles() {
        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 1.5, 60.0);
        camera.set_dragging(true);
        camera.on_cursor_moved(0.0, 0.0);
        camera.on_cursor_moved(0.0, 100000.0);
        camera.update(10.0);
        assert!(camera.pitch.abs() <= MAX_PITCH + 1e-4);
    }
}
