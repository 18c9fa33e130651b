//! GPU resource management.
//!
//! Provides wgpu device/surface initialization, the environment map
//! upload, and the background clear pass.

/// Background clear pass.
pub mod background;
/// Window surface, device and queue.
pub mod context;
/// Environment map texture upload.
pub mod environment;

pub use background::clear_pass;
pub use context::{GpuContext, GpuInitError};
pub use environment::EnvironmentTexture;
