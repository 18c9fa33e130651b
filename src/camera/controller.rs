use glam::{Quat, Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Largest |cos| between the view offset and the up axis; keeps pitch from
/// flipping over the poles.
const MAX_POLAR_COS: f32 = 0.999;

/// Orbit-style controller: rotates, pans and zooms the camera around a
/// target point.
#[derive(Debug, Clone)]
pub struct OrbitController {
    /// Point the camera orbits around.
    pub target: Vec3,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitController {
    /// Controller around `target` with default speeds.
    #[must_use]
    pub fn new(target: Vec3) -> Self {
        Self::from_options(target, &CameraOptions::default())
    }

    /// Controller around `target` using the speeds and distance limits in
    /// `options`.
    #[must_use]
    pub fn from_options(target: Vec3, options: &CameraOptions) -> Self {
        Self {
            target,
            rotate_speed: options.rotate_speed * 0.01,
            pan_speed: options.pan_speed * 0.002,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance,
        }
    }

    /// Point the camera at the orbit target.
    pub fn sync(&self, camera: &mut Camera) {
        camera.target = self.target;
    }

    /// Orbit by a mouse delta in pixels: horizontal motion yaws around the
    /// up axis, vertical motion pitches around the camera's right axis.
    pub fn rotate(&self, camera: &mut Camera, delta: Vec2) {
        let offset = camera.eye - self.target;
        if offset.length_squared() <= f32::EPSILON {
            return;
        }

        let yaw = Quat::from_axis_angle(camera.up, -delta.x * self.rotate_speed);
        let mut offset = yaw * offset;

        let right = offset.cross(camera.up).normalize_or_zero();
        if right != Vec3::ZERO {
            let pitch =
                Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
            let pitched = pitch * offset;
            let same_side = pitched.cross(camera.up).dot(right) > 0.0;
            if same_side
                && pitched.normalize().dot(camera.up).abs() < MAX_POLAR_COS
            {
                offset = pitched;
            }
        }

        camera.eye = self.target + offset;
        camera.target = self.target;
    }

    /// Slide target and eye together in the view plane. The step scales
    /// with the orbit distance so panning feels the same at any zoom.
    pub fn pan(&mut self, camera: &mut Camera, delta: Vec2) {
        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.pan_speed * camera.distance().max(1.0);

        let translation = right * (-delta.x * scale) + up * (delta.y * scale);

        self.target += translation;
        camera.eye += translation;
        camera.target = self.target;
    }

    /// Dolly toward (positive delta) or away from the target.
    pub fn zoom(&self, camera: &mut Camera, delta: f32) {
        let forward = camera.forward();
        let distance = (camera.eye.distance(self.target)
            * (1.0 - delta * self.zoom_speed))
            .clamp(self.min_distance, self.max_distance);
        camera.eye = self.target - forward * distance;
        camera.target = self.target;
    }

    /// Move the orbit pivot along with the camera.
    pub fn translate(&mut self, delta: Vec3) {
        self.target += delta;
    }
}
