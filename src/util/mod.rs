//! Shared utilities for the viewer loop.

/// Frame delta time and FPS tracking.
pub mod frame_timing;

pub use frame_timing::FrameTiming;
