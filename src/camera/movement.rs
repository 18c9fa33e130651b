//! Keyboard-driven horizontal movement of the camera and its orbit pivot.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::controller::OrbitController;
use super::core::Camera;

/// One of the four movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    /// Along the horizontal look direction.
    Forward,
    /// Against the horizontal look direction.
    Back,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
}

/// Per-direction intensities (0 = released, 1 = fully held).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveState {
    /// Forward intensity.
    pub forward: f32,
    /// Backward intensity.
    pub back: f32,
    /// Left strafe intensity.
    pub left: f32,
    /// Right strafe intensity.
    pub right: f32,
}

impl MoveState {
    /// Press or release a direction. Re-pressing a held key changes nothing.
    pub fn set(&mut self, direction: MoveDirection, pressed: bool) {
        let value = if pressed { 1.0 } else { 0.0 };
        match direction {
            MoveDirection::Forward => self.forward = value,
            MoveDirection::Back => self.back = value,
            MoveDirection::Left => self.left = value,
            MoveDirection::Right => self.right = value,
        }
    }

    /// `true` if any direction is held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.forward != 0.0 || self.back != 0.0 || self.left != 0.0 || self.right != 0.0
    }

    /// Release everything (e.g. when the window loses focus).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// World-space displacement for one frame, or `None` when nothing moves.
///
/// Forward is the look direction flattened onto the horizontal plane. The
/// lateral axis is `up × forward`, which points to the viewer's left, so
/// strafing stays level even with a rolled camera. Opposing keys cancel; the
/// sum is normalized and scaled by `speed * dt`.
#[must_use]
pub fn displacement(
    camera: &Camera,
    state: &MoveState,
    speed: f32,
    dt: f32,
) -> Option<Vec3> {
    if !state.is_active() {
        return None;
    }

    let mut forward = camera.forward();
    forward.y = 0.0;
    let forward = forward.normalize_or_zero();
    let lateral = camera.up.cross(forward).normalize_or_zero();

    let sum = forward * (state.forward - state.back)
        + lateral * (state.left - state.right);
    if sum.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(sum.normalize() * speed * dt)
}

/// Apply one frame of movement to the camera eye, its look target and the
/// orbit pivot. Returns the applied displacement.
pub fn apply_movement(
    camera: &mut Camera,
    controls: Option<&mut OrbitController>,
    state: &MoveState,
    speed: f32,
    dt: f32,
) -> Option<Vec3> {
    let delta = displacement(camera, state, speed, dt)?;
    camera.eye += delta;
    camera.target += delta;
    if let Some(controls) = controls {
        controls.translate(delta);
    }
    Some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_looking(forward: Vec3) -> Camera {
        Camera {
            eye: Vec3::ZERO,
            target: forward,
            ..Camera::default()
        }
    }

    fn held(directions: &[MoveDirection]) -> MoveState {
        let mut state = MoveState::default();
        for d in directions {
            state.set(*d, true);
        }
        state
    }

    #[test]
    fn opposing_keys_cancel() {
        let camera = camera_looking(Vec3::NEG_Z);
        let state = MoveState {
            forward: 1.0,
            back: 1.0,
            left: 0.0,
            right: 0.0,
        };
        assert_eq!(displacement(&camera, &state, 5.0, 0.1), None);
        let state = held(&[MoveDirection::Left, MoveDirection::Right]);
        assert_eq!(displacement(&camera, &state, 5.0, 0.1), None);
    }

    #[test]
    fn idle_is_noop() {
        let mut camera = camera_looking(Vec3::NEG_Z);
        let before = camera;
        let moved =
            apply_movement(&mut camera, None, &MoveState::default(), 5.0, 1.0);
        assert!(moved.is_none());
        assert_eq!(camera, before);
    }

    #[test]
    fn forward_ignores_pitch() {
        // looking down at 45 degrees
        let camera = camera_looking(Vec3::new(0.0, -1.0, -1.0));
        let state = held(&[MoveDirection::Forward]);
        let d = displacement(&camera, &state, 2.0, 0.5).unwrap();
        assert!(d.y.abs() < 1e-6);
        assert!((d - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn strafe_directions_match_screen() {
        let camera = camera_looking(Vec3::NEG_Z);
        let right = displacement(&camera, &held(&[MoveDirection::Right]), 1.0, 1.0)
            .unwrap();
        assert!((right - Vec3::X).length() < 1e-5);
        let left = displacement(&camera, &held(&[MoveDirection::Left]), 1.0, 1.0)
            .unwrap();
        assert!((left + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn diagonal_is_normalized_and_frame_rate_independent() {
        let camera = camera_looking(Vec3::NEG_Z);
        let state = held(&[MoveDirection::Forward, MoveDirection::Right]);
        let one = displacement(&camera, &state, 3.0, 1.0 / 30.0).unwrap();
        assert!((one.length() - 0.1).abs() < 1e-5);
        let half = displacement(&camera, &state, 3.0, 1.0 / 60.0).unwrap();
        assert!((one - half * 2.0).length() < 1e-6);
    }

    #[test]
    fn key_repeat_is_idempotent() {
        let mut state = MoveState::default();
        state.set(MoveDirection::Forward, true);
        let once = state;
        state.set(MoveDirection::Forward, true);
        assert_eq!(state, once);
        state.set(MoveDirection::Forward, false);
        assert!(!state.is_active());
    }

    #[test]
    fn movement_carries_orbit_pivot() {
        let mut camera = Camera {
            eye: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::ZERO,
            ..Camera::default()
        };
        let mut controls = OrbitController::new(Vec3::ZERO);
        let state = held(&[MoveDirection::Forward]);
        let delta =
            apply_movement(&mut camera, Some(&mut controls), &state, 1.0, 1.0)
                .unwrap();
        assert_eq!(controls.target, delta);
        assert_eq!(camera.target, delta);
        assert!((camera.eye - Vec3::new(0.0, 2.0, 5.0) - delta).length() < 1e-6);
    }
}
