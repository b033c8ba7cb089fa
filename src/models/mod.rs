pub mod player;

pub use player::{PlayerRecord, SceneInfo, ScriptInfo};
