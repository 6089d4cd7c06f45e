use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

/// Values extracted from responses during one execution, readable by later templates.
/// Extracted strings and numbers keep their JSON type.
#[derive(Debug, Default)]
pub struct RuntimeVars {
    values: RwLock<BTreeMap<String, JsonValue>>,
}

impl RuntimeVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> BTreeMap<String, JsonValue> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<JsonValue> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    /// Insert or overwrite a single key.
    pub fn set(&self, name: impl Into<String>, value: JsonValue) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
