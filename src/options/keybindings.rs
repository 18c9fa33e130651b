use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::camera::MoveDirection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping movement directions to key codes.
pub struct KeybindingOptions {
    /// Maps direction → key string (e.g. `Forward` → `"KeyW"`).
    pub bindings: HashMap<MoveDirection, String>,
    /// Reverse lookup cache (key string → direction). Rebuilt on load.
    #[serde(skip)]
    key_to_direction: HashMap<String, MoveDirection>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (MoveDirection::Forward, "KeyW".into()),
            (MoveDirection::Back, "KeyS".into()),
            (MoveDirection::Left, "KeyA".into()),
            (MoveDirection::Right, "KeyD".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_direction: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → direction).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_direction.clear();
        for (direction, key) in &self.bindings {
            let _ = self.key_to_direction.insert(key.clone(), *direction);
        }
    }

    /// Look up the direction bound to a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<MoveDirection> {
        self.key_to_direction.get(key).copied()
    }
}
