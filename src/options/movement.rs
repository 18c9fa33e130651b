use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Movement", inline)]
#[serde(default)]
/// Keyboard movement parameters.
pub struct MovementOptions {
    /// Walking speed in meters per second.
    #[schemars(title = "Speed", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub speed: f32,
}

impl Default for MovementOptions {
    fn default() -> Self {
        Self { speed: 2.5 }
    }
}
