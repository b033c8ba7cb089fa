use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Storage keys look like `plr:+15558675309`. The admin surface and all URL
/// paths use the friendly key, which is the storage key with this prefix
/// stripped (the bare number, no `+`).
pub const KEY_PREFIX: &str = "plr:+";

/// Shared handle handlers take through axum state.
pub type SharedStore = Arc<RwLock<PlayerStore>>;

pub fn storage_key(friendly: &str) -> String {
    format!("{KEY_PREFIX}{friendly}")
}

pub fn friendly_key(storage: &str) -> &str {
    storage.strip_prefix(KEY_PREFIX).unwrap_or(storage)
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no player record for key '{0}'")]
    NotFound(String),
    #[error("snapshot is not a JSON object")]
    MalformedSnapshot,
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Registry of player records: storage key -> opaque JSON payload.
///
/// The original deployment kept these in Redis; here the whole map lives in
/// memory and is mirrored to a JSON snapshot file after every mutation.
#[derive(Debug)]
pub struct PlayerStore {
    records: BTreeMap<String, Value>,
    snapshot: Option<PathBuf>,
}

impl PlayerStore {
    /// In-memory only store, nothing is persisted.
    pub fn empty() -> Self {
        Self {
            records: BTreeMap::new(),
            snapshot: None,
        }
    }

    /// Load the snapshot file if it exists, otherwise start empty.
    pub fn load(path: PathBuf) -> Result<Self, StoreError> {
        let records = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&raw)?;
            match value {
                Value::Object(map) => map.into_iter().collect(),
                _ => return Err(StoreError::MalformedSnapshot),
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            records,
            snapshot: Some(path),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full storage-key -> payload mapping, as served by `GET /players`.
    pub fn all(&self) -> BTreeMap<String, Value> {
        self.records.clone()
    }

    /// Storage keys in map order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.records.keys()
    }

    pub fn get(&self, friendly: &str) -> Option<&Value> {
        self.get_raw(&storage_key(friendly))
    }

    /// Lookup by full storage key, as handed back in the `GET /players`
    /// mapping.
    pub fn get_raw(&self, storage: &str) -> Option<&Value> {
        self.records.get(storage)
    }

    /// Insert or replace a record. Returns whether anything changed; the
    /// snapshot is only rewritten when it did (same check the old player
    /// store made before writing back to Redis).
    pub fn set(&mut self, friendly: &str, payload: Value) -> Result<bool, StoreError> {
        let key = storage_key(friendly);
        if self.records.get(&key) == Some(&payload) {
            return Ok(false);
        }
        let prev = self.records.insert(key.clone(), payload);
        if let Err(e) = self.persist() {
            // Keep memory and snapshot in agreement
            match prev {
                Some(p) => self.records.insert(key, p),
                None => self.records.remove(&key),
            };
            return Err(e);
        }
        Ok(true)
    }

    pub fn delete(&mut self, friendly: &str) -> Result<(), StoreError> {
        let key = storage_key(friendly);
        let Some(payload) = self.records.remove(&key) else {
            return Err(StoreError::NotFound(friendly.to_string()));
        };
        if let Err(e) = self.persist() {
            // Keep memory and snapshot in agreement
            self.records.insert(key, payload);
            return Err(e);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
