//! The viewer session: every piece of mutable viewer state in one place.
//!
//! A [`ViewerSession`] is driven from a single thread (the winit event loop
//! or the browser's animation frame). Input is routed through the
//! [`InputProcessor`]; finished loads arrive as [`LoadEvent`]s and are
//! applied here, each model re-framing the camera over everything loaded
//! so far.

use std::collections::HashMap;
use std::error::Error;

use glam::{Mat4, Vec3};
use image::Rgba32FImage;

use crate::assets::{LoadEvent, Resolved};
use crate::camera::{
    apply_movement, frame_bounds, Camera, Framing, MoveState, OrbitController,
};
use crate::error::VantageError;
use crate::input::{CameraCommand, InputEvent, InputProcessor};
use crate::options::{ModelOptions, Options};
use crate::scene::{normalize_object, Environment, Scene, SceneObject};

/// Outcome of a post-load hook.
pub type HookResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Fallible callback run on a model after it has been normalized and
/// placed, before it joins the scene.
pub type PostLoadHook = Box<dyn FnOnce(&mut SceneObject) -> HookResult>;

/// Owns options, scene, camera, controls, movement and input state.
pub struct ViewerSession {
    options: Options,
    scene: Scene,
    camera: Camera,
    controls: OrbitController,
    move_state: MoveState,
    input: InputProcessor,
    hooks: HashMap<String, PostLoadHook>,
    /// Configured model loads that have not reported yet.
    pending_models: usize,
}

impl ViewerSession {
    /// Fresh session with an empty scene and the configured camera.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let camera = Camera::from_options(&options.camera, 1.0);
        let controls = OrbitController::from_options(camera.target, &options.camera);
        let input = InputProcessor::new(options.keybindings.clone());
        Self {
            scene: Scene::new(options.display.clear_color),
            camera,
            controls,
            move_state: MoveState::default(),
            input,
            hooks: HashMap::new(),
            pending_models: options.assets.models.len(),
            options,
        }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Orbit controller.
    #[must_use]
    pub fn controls(&self) -> &OrbitController {
        &self.controls
    }

    /// Held movement keys.
    #[must_use]
    pub fn move_state(&self) -> &MoveState {
        &self.move_state
    }

    /// Input state and key bindings.
    #[must_use]
    pub fn input(&self) -> &InputProcessor {
        &self.input
    }

    /// Combined view-projection matrix for this frame.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.camera.build_matrix()
    }

    /// Apply one camera command.
    pub fn execute(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::Rotate { delta } => {
                self.controls.rotate(&mut self.camera, delta);
            }
            CameraCommand::Pan { delta } => {
                self.controls.pan(&mut self.camera, delta);
            }
            CameraCommand::Zoom { delta } => {
                self.controls.zoom(&mut self.camera, delta);
            }
            CameraCommand::Move { direction, pressed } => {
                self.move_state.set(direction, pressed);
            }
        }
    }

    /// Route a physical key change through the key bindings. Returns
    /// `true` if the key is bound. Repeats of the same state are harmless.
    pub fn handle_key(&mut self, code: &str, pressed: bool) -> bool {
        match self.input.handle_key(code, pressed) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Route a pointer/wheel/modifier event to the orbit controller.
    /// Returns `true` if the camera changed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match self.input.handle_event(event) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Drop held keys and buttons (window lost focus).
    pub fn release_input(&mut self) {
        self.move_state.clear();
        self.input.release_all();
    }

    /// Advance one frame: keyboard movement, then controller sync.
    pub fn update(&mut self, dt: f32) {
        let _ = apply_movement(
            &mut self.camera,
            Some(&mut self.controls),
            &self.move_state,
            self.options.movement.speed,
            dt,
        );
        self.controls.sync(&mut self.camera);
    }

    /// Viewport size changed. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Register a hook for the model named `name`. It runs once, when that
    /// model arrives; registering again replaces a pending hook. Hooks still
    /// pending once every configured model has reported are logged and
    /// dropped.
    pub fn register_post_load(&mut self, name: impl Into<String>, hook: PostLoadHook) {
        let _ = self.hooks.insert(name.into(), hook);
    }

    /// Number of hooks that have not run yet.
    #[must_use]
    pub fn pending_hooks(&self) -> usize {
        self.hooks.len()
    }

    /// Apply a finished load.
    pub fn handle_load(&mut self, event: LoadEvent) -> bool {
        match event {
            LoadEvent::Environment(result) => self.install_environment(result),
            LoadEvent::Model { options, result } => {
                let added = self.add_model(&options, result);
                self.model_reported();
                added
            }
        }
    }

    fn model_reported(&mut self) {
        self.pending_models = self.pending_models.saturating_sub(1);
        if self.pending_models > 0 {
            return;
        }
        for (name, _) in self.hooks.drain() {
            log::warn!("post-load hook for {name} never ran: no such model loaded");
        }
    }

    /// Install the result of the environment fallback chain. Returns `true`
    /// if an environment was installed.
    pub fn install_environment(
        &mut self,
        result: Result<Resolved<Rgba32FImage>, VantageError>,
    ) -> bool {
        match result {
            Ok(resolved) => {
                let environment =
                    Environment::from_equirect(resolved.location, resolved.value);
                log::info!(
                    "environment {} installed ({}x{}, attempt {})",
                    environment.source,
                    environment.width,
                    environment.height,
                    resolved.attempts
                );
                self.scene.install_environment(environment);
                true
            }
            Err(e) => {
                log::error!("no environment map could be loaded: {e}");
                false
            }
        }
    }

    /// Normalize, place and add a loaded model, then re-frame the camera
    /// over all models. A failed load is logged and leaves the scene as-is.
    pub fn add_model(
        &mut self,
        options: &ModelOptions,
        result: Result<SceneObject, VantageError>,
    ) -> bool {
        let name = options.display_name().to_owned();
        let mut model = match result {
            Ok(model) => model,
            Err(e) => {
                log::error!("model {name} failed to load: {e}");
                return false;
            }
        };
        model.name.clone_from(&name);

        match normalize_object(&mut model, options.target_size, options.floor) {
            Some(n) => log::debug!(
                "normalized {name}: scale {:.4}, shift {:?}",
                n.scale,
                n.shift
            ),
            None => log::warn!("model {name} has no geometry to normalize"),
        }
        model.transform.translation += Vec3::from_array(options.offset);

        if let Some(hook) = self.hooks.remove(&name) {
            if let Err(e) = hook(&mut model) {
                log::error!("post-load hook for {name} failed: {e}");
            }
        }

        self.scene.add_model(model);
        let _ = self.reframe();
        true
    }

    /// Frame the camera on the aggregate bounds of every loaded model.
    pub fn reframe(&mut self) -> Option<Framing> {
        let framing = frame_bounds(
            &mut self.camera,
            &self.scene.bounds(),
            self.options.camera.frame_offset,
            Some(&mut self.controls),
        )?;
        log::debug!(
            "framed {:?} at distance {:.3}",
            framing.center,
            framing.distance
        );
        Some(framing)
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;
    use crate::camera::MoveDirection;
    use crate::scene::{Background, Mesh};

    fn model(min: Vec3, max: Vec3) -> SceneObject {
        let mut root = SceneObject::group("root");
        root.add_child(SceneObject::with_mesh("mesh", Mesh::new(vec![min, max])));
        root
    }

    fn entry(name: &str, target_size: f32, offset: [f32; 3]) -> ModelOptions {
        ModelOptions {
            name: name.into(),
            path: format!("models/{name}.glb"),
            target_size,
            floor: true,
            offset,
        }
    }

    fn session() -> ViewerSession {
        let mut session = ViewerSession::new(Options::default());
        session.resize(1600, 900);
        session
    }

    #[test]
    fn added_model_is_normalized_and_placed() {
        let mut s = session();
        let chair = entry("chair", 1.0, [-0.75, 0.0, 0.0]);
        let geometry = model(Vec3::splat(-3.0), Vec3::new(3.0, 9.0, 1.0));
        assert!(s.add_model(&chair, Ok(geometry)));

        let placed = s.scene().models().child("chair").unwrap();
        let bounds = placed.world_bounds();
        assert!((bounds.max_dimension() - 1.0).abs() < 1e-5);
        assert!(bounds.min.y.abs() < 1e-5);
        assert!((bounds.center().x + 0.75).abs() < 1e-5);
    }

    #[test]
    fn failed_model_leaves_scene_untouched() {
        let mut s = session();
        let eye = s.camera().eye;
        let added = s.add_model(
            &entry("lamp", 1.0, [0.0; 3]),
            Err(VantageError::UnsupportedFormat("lamp.obj".into())),
        );
        assert!(!added);
        assert!(s.scene().models().children.is_empty());
        assert_eq!(s.camera().eye, eye);
    }

    #[test]
    fn load_order_does_not_change_final_camera() {
        let a = entry("a", 1.0, [-1.0, 0.0, 0.0]);
        let b = entry("b", 2.0, [1.5, 0.0, 0.5]);
        let a_geo = || model(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let b_geo = || model(Vec3::splat(-1.0), Vec3::new(1.0, 5.0, 1.0));

        let mut first = session();
        let _ = first.add_model(&a, Ok(a_geo()));
        let _ = first.add_model(&b, Ok(b_geo()));

        let mut second = session();
        let _ = second.add_model(&b, Ok(b_geo()));
        let _ = second.add_model(&a, Ok(a_geo()));

        assert!(first.camera().eye.abs_diff_eq(second.camera().eye, 1e-4));
        assert!(first
            .camera()
            .target
            .abs_diff_eq(second.camera().target, 1e-5));
        assert!(first
            .controls()
            .target
            .abs_diff_eq(second.camera().target, 1e-5));
    }

    #[test]
    fn reframe_targets_aggregate_center() {
        let mut s = session();
        let cube = || Ok(model(Vec3::ZERO, Vec3::ONE));
        let _ = s.add_model(&entry("a", 1.0, [-2.0, 0.0, 0.0]), cube());
        let _ = s.add_model(&entry("b", 1.0, [2.0, 0.0, 0.0]), cube());
        let center = s.scene().bounds().center();
        assert!(center.x.abs() < 1e-5);
        assert!(s.camera().target.abs_diff_eq(center, 1e-5));
    }

    #[test]
    fn post_load_hook_runs_once_with_normalized_model() {
        let mut s = session();
        s.register_post_load(
            "chair",
            Box::new(|model: &mut SceneObject| -> HookResult {
                let bounds = model.world_bounds();
                if (bounds.max_dimension() - 1.0).abs() > 1e-4 {
                    return Err("not normalized".into());
                }
                model.name = "chair (hooked)".into();
                Ok(())
            }),
        );
        let geometry = model(Vec3::ZERO, Vec3::splat(4.0));
        let _ = s.add_model(&entry("chair", 1.0, [0.0; 3]), Ok(geometry));
        assert!(s.scene().models().child("chair (hooked)").is_some());
    }

    #[test]
    fn unmatched_hooks_dropped_after_last_load() {
        let mut s = session();
        for name in ["chair", "ghost"] {
            let hook: PostLoadHook = Box::new(|_: &mut SceneObject| -> HookResult { Ok(()) });
            s.register_post_load(name, hook);
        }

        let mut models = s.options().assets.models.clone().into_iter();
        let first = models.next().unwrap();
        let first_name = first.display_name().to_owned();
        let _ = s.handle_load(LoadEvent::Model {
            options: first,
            result: Ok(model(Vec3::ZERO, Vec3::ONE)),
        });
        assert_eq!(first_name, "chair");
        assert_eq!(s.pending_hooks(), 1);

        for options in models {
            let _ = s.handle_load(LoadEvent::Model {
                options,
                result: Err(VantageError::NoCandidates),
            });
        }
        assert_eq!(s.pending_hooks(), 0);
    }

    #[test]
    fn failing_hook_does_not_drop_model() {
        let mut s = session();
        s.register_post_load(
            "lamp",
            Box::new(|_: &mut SceneObject| -> HookResult { Err("boom".into()) }),
        );
        let geometry = model(Vec3::ZERO, Vec3::ONE);
        assert!(s.add_model(&entry("lamp", 1.0, [0.0; 3]), Ok(geometry)));
        assert!(s.scene().models().child("lamp").is_some());
    }

    #[test]
    fn environment_result_switches_background() {
        let mut s = session();
        let failed = Err(VantageError::AllCandidatesFailed { attempts: 3 });
        assert!(!s.install_environment(failed));
        assert_eq!(
            s.scene().background(),
            Background::Color(s.options().display.clear_color)
        );

        let image = Rgba32FImage::from_pixel(8, 4, Rgba([1.0, 1.0, 1.0, 1.0]));
        let resolved = Resolved {
            location: "assets/HDR/neutral.hdr".into(),
            value: image,
            attempts: 3,
        };
        assert!(s.handle_load(LoadEvent::Environment(Ok(resolved))));
        assert_eq!(s.scene().background(), Background::Environment);
        assert_eq!(s.scene().environment().unwrap().width, 8);
    }

    #[test]
    fn held_key_moves_camera_and_pivot() {
        let mut s = session();
        let eye = s.camera().eye;
        let pivot = s.controls().target;
        assert!(s.handle_key("KeyW", true));
        assert!(s.handle_key("KeyW", true));
        s.update(0.5);

        let moved = s.camera().eye - eye;
        assert!((moved.length() - s.options().movement.speed * 0.5).abs() < 1e-4);
        assert!(moved.y.abs() < 1e-6);
        assert!((s.controls().target - pivot).abs_diff_eq(moved, 1e-5));

        assert!(s.handle_key("KeyW", false));
        assert!(!s.move_state().is_active());
        assert!(!s.handle_key("KeyP", true));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut s = session();
        let eye = s.camera().eye;
        s.execute(CameraCommand::Move {
            direction: MoveDirection::Forward,
            pressed: true,
        });
        s.execute(CameraCommand::Move {
            direction: MoveDirection::Back,
            pressed: true,
        });
        s.update(1.0);
        assert_eq!(s.camera().eye, eye);
    }

    #[test]
    fn release_input_stops_movement() {
        let mut s = session();
        let _ = s.handle_key("KeyD", true);
        s.release_input();
        assert!(!s.move_state().is_active());
    }
}
