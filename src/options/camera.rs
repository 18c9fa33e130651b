use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, framing and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Initial near clipping plane distance (framing replaces it).
    #[schemars(skip)]
    pub znear: f32,
    /// Initial far clipping plane distance (framing replaces it).
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position before any model is framed.
    #[schemars(skip)]
    pub eye: [f32; 3],
    /// Initial look/orbit target.
    #[schemars(skip)]
    pub target: [f32; 3],
    /// Distance multiplier applied when framing the scene.
    #[schemars(title = "Frame Offset", range(min = 1.0, max = 3.0), extend("step" = 0.05))]
    pub frame_offset: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Closest the orbit zoom may get to the target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest the orbit zoom may get from the target.
    #[schemars(skip)]
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 5000.0,
            eye: [3.0, 2.0, 5.0],
            target: [0.0, 1.0, 0.0],
            frame_offset: 1.25,
            rotate_speed: 0.5,
            pan_speed: 0.5,
            zoom_speed: 0.1,
            min_distance: 0.5,
            max_distance: 500.0,
        }
    }
}
