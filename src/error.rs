//! Crate-level error types.

use std::fmt;

use crate::gpu::GpuInitError;

/// Errors produced by the vantage crate.
#[derive(Debug)]
pub enum VantageError {
    /// GPU context initialization failure.
    Gpu(GpuInitError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background loader thread.
    ThreadSpawn(std::io::Error),
    /// A remote or browser fetch failed.
    Fetch {
        /// The location that was requested.
        location: String,
        /// Transport-level failure description.
        reason: String,
    },
    /// The file extension has no decoder.
    UnsupportedFormat(String),
    /// An environment image could not be decoded.
    EnvironmentDecode(image::ImageError),
    /// A model file could not be parsed into a scene object.
    ModelDecode(String),
    /// The load order was empty after filtering blank entries.
    NoCandidates,
    /// Every candidate in a fallback chain failed.
    AllCandidatesFailed {
        /// Number of candidates that were tried.
        attempts: usize,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for VantageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::Fetch { location, reason } => {
                write!(f, "failed to fetch {location}: {reason}")
            }
            Self::UnsupportedFormat(location) => {
                write!(f, "unsupported file extension: {location}")
            }
            Self::EnvironmentDecode(e) => {
                write!(f, "environment decode error: {e}")
            }
            Self::ModelDecode(msg) => write!(f, "model decode error: {msg}"),
            Self::NoCandidates => write!(f, "load order has no candidates"),
            Self::AllCandidatesFailed { attempts } => {
                write!(f, "all {attempts} candidates failed to load")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for VantageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            Self::EnvironmentDecode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GpuInitError> for VantageError {
    fn from(e: GpuInitError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for VantageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for VantageError {
    fn from(e: image::ImageError) -> Self {
        Self::EnvironmentDecode(e)
    }
}

impl From<gltf::Error> for VantageError {
    fn from(e: gltf::Error) -> Self {
        Self::ModelDecode(e.to_string())
    }
}
