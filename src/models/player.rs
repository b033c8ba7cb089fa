use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Script state a player starts in.
pub const SCRIPT_NEW_STATE: &str = "State_New";
/// Terminal script state.
pub const SCRIPT_END_STATE: &str = "State_End";

/// Per-scene progress inside a script. Deserialization is lenient: records
/// written by older builds may be missing any of these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prev_room: Option<u32>,
    #[serde(default)]
    pub rooms_visited: Vec<String>,
    /// The only field exposed to rooms.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl SceneInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A player's progress through one script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub state: String,
    #[serde(default)]
    pub scene_states: BTreeMap<String, SceneInfo>,
    #[serde(default)]
    pub scene_path: Vec<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl ScriptInfo {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            scene_states: BTreeMap::new(),
            scene_path: Vec::new(),
            data: Map::new(),
        }
    }

    /// Scene state by name, created on first access.
    pub fn scene(&mut self, name: &str) -> &mut SceneInfo {
        self.scene_states
            .entry(name.to_string())
            .or_insert_with(|| SceneInfo::new(name))
    }
}

/// Typed view over a player payload. The HTTP surface treats payloads as
/// opaque JSON; this is the conventional shape game code writes into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayerRecord {
    #[serde(default)]
    pub scripts: BTreeMap<String, ScriptInfo>,
}

impl PlayerRecord {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Script progress by name, created in the new state on first access.
    pub fn script(&mut self, name: &str) -> &mut ScriptInfo {
        self.scripts
            .entry(name.to_string())
            .or_insert_with(|| ScriptInfo::new(SCRIPT_NEW_STATE))
    }

    /// Throw away a script's progress and start it over.
    pub fn reset_script(&mut self, name: &str) {
        self.scripts
            .insert(name.to_string(), ScriptInfo::new(SCRIPT_NEW_STATE));
    }
}
