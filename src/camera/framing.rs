//! Fit-to-bounds camera placement.

use glam::Vec3;

use super::controller::OrbitController;
use super::core::Camera;
use crate::scene::BoundingVolume;

/// Default distance multiplier for [`frame_bounds`].
pub const DEFAULT_FRAME_OFFSET: f32 = 1.25;

/// Framing distance for a degenerate (point-like) volume, where the fit
/// formula would put the eye on the target.
pub const MIN_FRAME_DISTANCE: f32 = 0.1;

/// Result of a successful [`frame_bounds`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// Distance from the volume center to the new eye position.
    pub distance: f32,
    /// Volume center the camera now looks at.
    pub center: Vec3,
}

/// Eye-to-center distance needed to fit a volume of largest dimension
/// `max_dim` into a camera with vertical FOV `fovy_radians` and `aspect`.
///
/// Portrait viewports (aspect < 1) push the camera back further since the
/// horizontal frustum is the narrow one.
#[must_use]
pub fn fit_distance(max_dim: f32, fovy_radians: f32, aspect: f32, offset: f32) -> f32 {
    let mut distance = (max_dim * 0.5) / (fovy_radians * 0.5).tan();
    if aspect < 1.0 && aspect > 0.0 {
        distance /= aspect;
    }
    distance * offset
}

/// Place `camera` so all of `bounds` is visible.
///
/// The eye moves along the camera's current forward direction, so repeated
/// calls (e.g. as more models arrive) keep the viewing angle. Near/far clip
/// planes scale with the distance. An orbit controller, when given, is
/// retargeted at the volume center. Empty volumes leave everything
/// untouched and return `None`.
pub fn frame_bounds(
    camera: &mut Camera,
    bounds: &BoundingVolume,
    offset: f32,
    controls: Option<&mut OrbitController>,
) -> Option<Framing> {
    if bounds.is_empty() {
        return None;
    }

    let center = bounds.center();
    let mut distance = fit_distance(
        bounds.max_dimension(),
        camera.fovy_radians(),
        camera.aspect,
        offset,
    );
    if bounds.is_degenerate() {
        distance = distance.max(MIN_FRAME_DISTANCE);
    }

    let forward = camera.forward();
    camera.eye = center - forward * distance;
    camera.target = center;
    camera.znear = (distance / 100.0).max(0.01);
    camera.zfar = (distance * 100.0).max(5000.0);

    if let Some(controls) = controls {
        controls.target = center;
    }

    Some(Framing { distance, center })
}
