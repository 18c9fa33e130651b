use serde::{Deserialize, Serialize};

use crate::assets::path::asset_url;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Environment map candidates, tried in order until one decodes.
///
/// Blank entries are skipped, so a single working map can be configured
/// by leaving the others empty.
pub struct EnvironmentOptions {
    /// First choice (usually the high-quality `.exr`).
    pub primary: String,
    /// Second choice.
    pub secondary: String,
    /// Last resort.
    pub fallback: String,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            primary: "HDR/studio_small.exr".into(),
            secondary: "HDR/studio_small.hdr".into(),
            fallback: "HDR/neutral.hdr".into(),
        }
    }
}

impl EnvironmentOptions {
    /// Candidate locations in priority order, relative to the asset base.
    #[must_use]
    pub fn candidates(&self) -> [&str; 3] {
        [
            self.primary.as_str(),
            self.secondary.as_str(),
            self.fallback.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// One model to load at startup.
pub struct ModelOptions {
    /// Name used for logs and post-load hooks. Defaults to the file stem.
    pub name: String,
    /// Location relative to the asset base.
    pub path: String,
    /// Largest bounding dimension after normalization, in meters.
    pub target_size: f32,
    /// Whether to rest the model on Y = 0.
    pub floor: bool,
    /// Placement offset applied after normalization.
    pub offset: [f32; 3],
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            target_size: 1.0,
            floor: true,
            offset: [0.0; 3],
        }
    }
}

impl ModelOptions {
    /// Model entry for `path` with default sizing.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Configured name, or the file stem of the path when unset.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        file.split_once('.').map_or(file, |(stem, _)| stem)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Where assets come from and which ones to load.
pub struct AssetOptions {
    /// Directory or URL prefix every asset path is resolved against.
    pub base_path: String,
    /// Environment map candidates.
    pub environment: EnvironmentOptions,
    /// Models loaded at startup.
    pub models: Vec<ModelOptions>,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            base_path: "assets/".into(),
            environment: EnvironmentOptions::default(),
            models: vec![
                ModelOptions {
                    name: "chair".into(),
                    path: "models/chair.glb".into(),
                    target_size: 1.0,
                    floor: true,
                    offset: [-0.75, 0.0, 0.0],
                },
                ModelOptions {
                    name: "lamp".into(),
                    path: "models/lamp.glb".into(),
                    target_size: 1.6,
                    floor: true,
                    offset: [0.75, 0.0, 0.0],
                },
            ],
        }
    }
}

impl AssetOptions {
    /// Resolve `relative` against the configured base path.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> String {
        asset_url(&self.base_path, relative)
    }

    /// Environment candidates resolved against the base path. Blank
    /// entries stay blank so the load order can drop them.
    #[must_use]
    pub fn environment_candidates(&self) -> Vec<String> {
        self.environment
            .candidates()
            .iter()
            .map(|c| {
                if c.trim().is_empty() {
                    String::new()
                } else {
                    self.resolve(c)
                }
            })
            .collect()
    }
}
