// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Small 3D scene viewer core built on wgpu.
//!
//! Vantage loads an HDR environment map through an ordered fallback chain,
//! loads glTF models, normalizes each one to a canonical size resting on
//! the ground plane, and frames the camera on everything loaded so far.
//! An orbit controller and WASD-style horizontal movement drive the camera.
//!
//! # Key entry points
//!
//! - [`session::ViewerSession`] - all mutable viewer state and its
//!   operations
//! - [`assets`] - path joining, fallback resolution, environment and model
//!   loaders
//! - [`scene::normalize_object`] and [`camera::frame_bounds`] - the
//!   normalization and framing math
//! - [`options::Options`] - runtime configuration (assets, camera,
//!   movement, display, keybindings)
//!
//! # Architecture
//!
//! Loads run as independent async tasks (a thread per load natively,
//! `spawn_local` in the browser) that post [`assets::LoadEvent`]s onto a
//! channel. The frame loop drains that channel once per frame, so all
//! scene and camera mutation happens on one thread.

pub mod assets;
pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod scene;
pub mod session;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use error::VantageError;
pub use input::InputEvent;
pub use options::Options;
pub use session::ViewerSession;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
