use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Viewport display settings.
pub struct DisplayOptions {
    /// Clear color used until an environment map is installed (linear RGB).
    #[schemars(title = "Clear Color")]
    pub clear_color: [f32; 3],
    /// Frame rate cap for the native viewer (0 = unlimited).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.06, 0.06, 0.08],
            target_fps: 0,
        }
    }
}
