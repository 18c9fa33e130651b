//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera, an orbit controller for mouse input,
//! fit-to-bounds framing, keyboard movement, and frustum checks.

/// Orbit controller managing rotation, pan and zoom around a target.
pub mod controller;
/// Core camera struct.
pub mod core;
/// Fit-to-bounds camera placement.
pub mod framing;
/// View frustum extraction and containment tests.
pub mod frustum;
/// WASD-style horizontal movement.
pub mod movement;

pub use self::controller::OrbitController;
pub use self::core::Camera;
pub use self::framing::{frame_bounds, Framing, DEFAULT_FRAME_OFFSET};
pub use self::movement::{apply_movement, MoveDirection, MoveState};
