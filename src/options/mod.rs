//! Centralized viewer options with TOML support.
//!
//! Asset locations, camera, movement, display and keybinding settings are
//! consolidated here. Options serialize to/from TOML so a scene can be
//! described by a single file.

mod assets;
mod camera;
mod display;
mod keybindings;
mod movement;

use std::path::Path;

pub use assets::{AssetOptions, EnvironmentOptions, ModelOptions};
pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use movement::MovementOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VantageError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Asset base path, environment candidates and startup models.
    #[schemars(skip)]
    pub assets: AssetOptions,
    /// Camera projection, framing and control parameters.
    pub camera: CameraOptions,
    /// Keyboard movement parameters.
    pub movement: MovementOptions,
    /// Viewport display settings.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, VantageError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VantageError> {
        let content = std::fs::read_to_string(path).map_err(VantageError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VantageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VantageError::Io)?;
        }
        std::fs::write(path, content).map_err(VantageError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::MoveDirection;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
fovy = 70.0

[assets]
base_path = "https://example.org/app/"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 70.0);
        // Everything else should be default
        assert_eq!(opts.camera.frame_offset, 1.25);
        assert_eq!(opts.movement.speed, 2.5);
        assert_eq!(opts.assets.environment, EnvironmentOptions::default());
        assert!(!opts.assets.models.is_empty());
    }

    #[test]
    fn models_parse_from_array_of_tables() {
        let toml_str = r#"
[[assets.models]]
path = "models/statue.glb"
target_size = 2.0
floor = false
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.assets.models.len(), 1);
        let model = &opts.assets.models[0];
        assert_eq!(model.display_name(), "statue");
        assert_eq!(model.target_size, 2.0);
        assert!(!model.floor);
        assert_eq!(model.offset, [0.0; 3]);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(MoveDirection::Forward));
        assert_eq!(opts.keybindings.lookup("KeyD"), Some(MoveDirection::Right));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn rebound_keys_survive_parsing() {
        let toml_str = r#"
[keybindings.bindings]
forward = "ArrowUp"
back = "ArrowDown"
left = "ArrowLeft"
right = "ArrowRight"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("ArrowUp"),
            Some(MoveDirection::Forward)
        );
        assert_eq!(opts.keybindings.lookup("KeyW"), None);
    }

    #[test]
    fn environment_candidates_resolve_against_base() {
        let mut assets = AssetOptions::default();
        assets.base_path = "app/".into();
        assets.environment.primary = "/HDR/x.exr".into();
        assets.environment.secondary = String::new();
        let candidates = assets.environment_candidates();
        assert_eq!(candidates[0], "app/HDR/x.exr");
        assert_eq!(candidates[1], "");
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("movement"));
        assert!(props.contains_key("display"));

        // Skipped sections should be absent
        assert!(!props.contains_key("assets"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("frame_offset").is_some());
        assert!(camera.get("eye").is_none());
    }
}
