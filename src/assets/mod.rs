//! Asset loading: path resolution, fallback chains, byte sources, and
//! decoders for environment maps and glTF models.

/// Environment map dispatch and decoding.
pub mod environment;
/// Load-completion queue between loader tasks and the frame loop.
pub mod loads;
/// glTF model loading.
pub mod model;
/// Asset location helpers.
pub mod path;
/// Ordered fallback chains.
pub mod resolver;
/// Byte sources (filesystem, HTTP, browser fetch).
pub mod source;

pub use environment::{decode_environment, load_environment, EnvFormat};
pub use loads::{LoadEvent, LoadQueue, LoadSender};
pub use model::{load_model, ModelFormat};
pub use path::asset_url;
pub use resolver::{resolve_first, LoadOrder, Resolved};
#[cfg(feature = "web")]
pub use source::FetchSource;
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{AssetSource, FileSource};
