//! Completed-load delivery from loader tasks to the frame loop.
//!
//! Loader tasks (native threads or browser futures) run the async loaders
//! and post a [`LoadEvent`] when they finish. The frame loop drains the
//! queue once per frame and applies results in arrival order.

use std::sync::mpsc;

use image::Rgba32FImage;

use super::environment::load_environment;
use super::model::load_model;
use super::resolver::Resolved;
use super::source::AssetSource;
use crate::error::VantageError;
use crate::options::{AssetOptions, ModelOptions};
use crate::scene::SceneObject;

/// A finished asset load.
#[derive(Debug)]
pub enum LoadEvent {
    /// The environment fallback chain finished.
    Environment(Result<Resolved<Rgba32FImage>, VantageError>),
    /// A model finished loading.
    Model {
        /// The entry that was requested.
        options: ModelOptions,
        /// Parsed model, not yet normalized.
        result: Result<SceneObject, VantageError>,
    },
}

/// Sending half handed to loader tasks.
pub type LoadSender = mpsc::Sender<LoadEvent>;

/// Receiving side of the load channel, owned by the frame loop.
#[derive(Debug)]
pub struct LoadQueue {
    tx: LoadSender,
    rx: mpsc::Receiver<LoadEvent>,
}

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A sender for a new loader task.
    #[must_use]
    pub fn sender(&self) -> LoadSender {
        self.tx.clone()
    }

    /// Take every event that has arrived so far without blocking.
    pub fn drain(&self) -> Vec<LoadEvent> {
        self.rx.try_iter().collect()
    }
}

/// Run the environment fallback chain configured in `assets`.
pub async fn environment_event<S: AssetSource>(
    source: &S,
    assets: &AssetOptions,
) -> LoadEvent {
    LoadEvent::Environment(
        load_environment(source, assets.environment_candidates()).await,
    )
}

/// Load one configured model.
pub async fn model_event<S: AssetSource>(
    source: &S,
    assets: &AssetOptions,
    options: ModelOptions,
) -> LoadEvent {
    let location = assets.resolve(&options.path);
    let result = load_model(source, &location).await;
    LoadEvent::Model { options, result }
}

/// Run `load` and post its event. A closed queue means the viewer is gone,
/// so the result is dropped.
pub async fn post<F>(tx: LoadSender, load: F)
where
    F: std::future::Future<Output = LoadEvent>,
{
    if tx.send(load.await).is_err() {
        log::debug!("load finished after the viewer shut down");
    }
}
