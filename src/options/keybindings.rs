use std::collections::{BTreeMap, HashMap};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawKeybindings", into = "RawKeybindings")]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format: `"KeyW"`,
/// `"Space"`, `"Escape"`, etc.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `Quit` → `"Escape"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action).
    key_to_action: FxHashMap<String, KeyAction>,
}

/// On-disk shape: only the forward map is stored. Entries override the
/// defaults one by one in action order, so a file may rebind a single
/// action and the later action wins a shared key.
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct RawKeybindings {
    bindings: BTreeMap<KeyAction, String>,
}

impl From<RawKeybindings> for KeybindingOptions {
    fn from(raw: RawKeybindings) -> Self {
        let mut opts = Self::default();
        for (action, key) in raw.bindings {
            opts.assign(action, key);
        }
        opts.rebuild_reverse_map();
        opts
    }
}

impl From<KeybindingOptions> for RawKeybindings {
    fn from(opts: KeybindingOptions) -> Self {
        Self {
            bindings: opts.bindings.into_iter().collect(),
        }
    }
}

fn default_bindings() -> HashMap<KeyAction, String> {
    HashMap::from([
        (KeyAction::MoveForward, "KeyW".into()),
        (KeyAction::MoveBackward, "KeyS".into()),
        (KeyAction::StrafeLeft, "KeyA".into()),
        (KeyAction::StrafeRight, "KeyD".into()),
        (KeyAction::ResetCamera, "KeyR".into()),
        (KeyAction::Quit, "Escape".into()),
    ])
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

impl PartialEq for KeybindingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl KeybindingOptions {
    /// Build from a forward map, deriving the reverse lookup.
    #[must_use]
    pub fn from_bindings(bindings: HashMap<KeyAction, String>) -> Self {
        let mut opts = Self {
            bindings,
            key_to_action: FxHashMap::default(),
        };
        opts.rebuild_reverse_map();
        opts
    }

    /// Rebind `action` to `key`, replacing any previous key for it. Any
    /// other action bound to `key` is unbound.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        self.assign(action, key.into());
        self.rebuild_reverse_map();
    }

    /// Forward-map update only; a key maps to at most one action.
    fn assign(&mut self, action: KeyAction, key: String) {
        self.bindings
            .retain(|other, bound| *other == action || *bound != key);
        let _ = self.bindings.insert(action, key);
    }

    /// Rebuild the reverse lookup map (key string → action). If the
    /// forward map shares a key between actions, the later action wins.
    pub fn rebuild_reverse_map(&mut self) {
        let mut entries: Vec<_> = self.bindings.iter().collect();
        entries.sort_unstable_by_key(|(action, _)| **action);
        self.key_to_action.clear();
        for (action, key) in entries {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}
