//! Loosely typed profile record as it travels over the wire and through the cache.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object of profile attributes.
///
/// Both the remote row and the locally cached record use this shape. Keys
/// that are present (even with a `null` value) are distinguishable from keys
/// that are absent, which is what the local-over-remote overlay relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileFields(Map<String, Value>);

impl ProfileFields {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps an existing JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Decodes a JSON object. Anything that is not an object is rejected.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Encodes as a compact JSON object.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value under `key` when it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Shallow overlay: every key present in `top` replaces the same key here.
    pub fn overlay(&mut self, top: &ProfileFields) {
        for (key, value) in &top.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ProfileFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
