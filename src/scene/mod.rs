//! Scene state: the group of loaded models and the installed environment.
//!
//! Geometry lives in a small [`SceneObject`] tree; bounding volumes are
//! always derived from it on demand rather than cached.

/// Axis-aligned bounding volumes.
pub mod bounds;
/// Installed environment map data.
pub mod environment;
/// Model normalization to canonical size and placement.
pub mod normalize;
/// Scene-object tree and transforms.
pub mod object;

pub use bounds::BoundingVolume;
pub use environment::Environment;
pub use normalize::{normalize_object, Normalization};
pub use object::{Mesh, SceneObject, Transform};

/// What the viewport shows behind the models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Flat clear color (linear RGB).
    Color([f32; 3]),
    /// The installed environment map.
    Environment,
}

/// Everything the viewer displays.
#[derive(Debug, Clone)]
pub struct Scene {
    models: SceneObject,
    environment: Option<Environment>,
    background: Background,
}

impl Scene {
    /// Empty scene with a flat background.
    #[must_use]
    pub fn new(clear_color: [f32; 3]) -> Self {
        Self {
            models: SceneObject::group("models"),
            environment: None,
            background: Background::Color(clear_color),
        }
    }

    /// Group holding every loaded model.
    #[must_use]
    pub fn models(&self) -> &SceneObject {
        &self.models
    }

    /// Add a loaded (and already normalized) model to the group.
    pub fn add_model(&mut self, model: SceneObject) {
        self.models.add_child(model);
    }

    /// Aggregate bounds over every loaded model.
    #[must_use]
    pub fn bounds(&self) -> BoundingVolume {
        self.models.world_bounds()
    }

    /// Install `environment` as both lighting environment and background,
    /// replacing any previous one.
    pub fn install_environment(&mut self, environment: Environment) {
        self.environment = Some(environment);
        self.background = Background::Environment;
    }

    /// The installed environment, if any.
    #[must_use]
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    /// Current background mode.
    #[must_use]
    pub fn background(&self) -> Background {
        self.background
    }

    /// Color the renderer should clear to this frame.
    #[must_use]
    pub fn clear_color(&self) -> [f32; 3] {
        match (self.background, &self.environment) {
            (Background::Environment, Some(env)) => env.background_color(),
            (Background::Color(color), _) => color,
            (Background::Environment, None) => [0.0; 3],
        }
    }
}
