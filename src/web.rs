//! Browser entry point.
//!
//! The page owns the canvas and the animation-frame loop; it forwards DOM
//! events and elapsed time to a [`WebViewer`] and reads back the camera
//! matrices. Asset loads run as `spawn_local` futures over `fetch()`.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::assets::loads::{environment_event, model_event, post};
use crate::assets::{FetchSource, LoadQueue};
use crate::input::InputEvent;
use crate::options::Options;
use crate::session::ViewerSession;

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("console logger already initialised");
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A viewer session driven from JavaScript.
#[wasm_bindgen]
pub struct WebViewer {
    session: ViewerSession,
    loads: LoadQueue,
}

impl WebViewer {
    fn spawn_loads(&self) {
        let assets = self.session.options().assets.clone();
        {
            let assets = assets.clone();
            spawn_local(post(self.loads.sender(), async move {
                environment_event(&FetchSource, &assets).await
            }));
        }
        for model in assets.models.clone() {
            let assets = assets.clone();
            spawn_local(post(self.loads.sender(), async move {
                model_event(&FetchSource, &assets, model).await
            }));
        }
    }
}

#[wasm_bindgen]
impl WebViewer {
    /// Create a viewer from optional TOML options and start loading the
    /// configured environment and models.
    #[wasm_bindgen(constructor)]
    pub fn new(options_toml: Option<String>) -> Result<WebViewer, JsValue> {
        let options = match options_toml {
            Some(text) => Options::from_toml_str(&text).map_err(js_error)?,
            None => Options::default(),
        };
        let viewer = Self {
            session: ViewerSession::new(options),
            loads: LoadQueue::new(),
        };
        viewer.spawn_loads();
        Ok(viewer)
    }

    /// Canvas size changed (physical pixels).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.session.resize(width, height);
    }

    /// `KeyboardEvent.code` went down or up. Returns `true` if bound.
    pub fn key_event(&mut self, code: &str, pressed: bool) -> bool {
        self.session.handle_key(code, pressed)
    }

    /// Pointer moved to canvas coordinates.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let _ = self.session.handle_input(InputEvent::Cursor { x, y });
    }

    /// `MouseEvent.button` pressed or released. Only the primary button
    /// (0) drags.
    pub fn pointer_button(&mut self, button: i16, pressed: bool) {
        if button == 0 {
            let _ = self
                .session
                .handle_input(InputEvent::PrimaryButton { pressed });
        }
    }

    /// Wheel scrolled; positive zooms in.
    pub fn wheel(&mut self, delta: f32) {
        let _ = self.session.handle_input(InputEvent::Wheel { delta });
    }

    /// Shift key state changed.
    pub fn set_shift(&mut self, shift: bool) {
        let _ = self
            .session
            .handle_input(InputEvent::Shift { held: shift });
    }

    /// Window lost focus: forget held keys and buttons.
    pub fn blur(&mut self) {
        self.session.release_input();
    }

    /// Advance one animation frame: apply finished loads, then move.
    pub fn frame(&mut self, dt: f32) {
        for event in self.loads.drain() {
            let _ = self.session.handle_load(event);
        }
        self.session.update(dt.min(crate::util::frame_timing::MAX_FRAME_DT));
    }

    /// Column-major view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Vec<f32> {
        self.session.view_projection().to_cols_array().to_vec()
    }

    /// Column-major view matrix.
    #[must_use]
    pub fn view(&self) -> Vec<f32> {
        self.session.camera().build_view().to_cols_array().to_vec()
    }

    /// Column-major projection matrix.
    #[must_use]
    pub fn projection(&self) -> Vec<f32> {
        self.session.camera().build_projection().to_cols_array().to_vec()
    }

    /// Camera eye position.
    #[must_use]
    pub fn camera_eye(&self) -> Vec<f32> {
        self.session.camera().eye.to_array().to_vec()
    }

    /// Camera look target.
    #[must_use]
    pub fn camera_target(&self) -> Vec<f32> {
        self.session.camera().target.to_array().to_vec()
    }

    /// Background clear color (linear RGB).
    #[must_use]
    pub fn clear_color(&self) -> Vec<f32> {
        self.session.scene().clear_color().to_vec()
    }

    /// Number of models added so far.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.session.scene().models().children.len()
    }

    /// Whether an environment map has been installed.
    #[must_use]
    pub fn has_environment(&self) -> bool {
        self.session.scene().environment().is_some()
    }
}
