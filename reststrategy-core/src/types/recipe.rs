use indexmap::IndexMap;

use crate::types::{Action, AuthConfig};

/// Top-level reconciliation document.
///
/// `seed` order is significant: actions run in the order they are declared, so an action
/// whose template reads a runtime variable must come after the action that extracts it.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub auth: IndexMap<String, AuthConfig>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub seed: IndexMap<String, Action>,
}
