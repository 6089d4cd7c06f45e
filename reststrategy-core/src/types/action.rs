use indexmap::IndexMap;

use crate::types::{JsonPathExpression, Strategy, Variables};

/// A single reconciliation step against one remote resource.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub strategy: Strategy,

    pub endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_endpoint_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_endpoint_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_endpoint_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_endpoint_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_endpoint_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub find_by_json_path_expr: Option<JsonPathExpression>,

    #[serde(default)]
    pub payload_template: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_payload_template: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: Variables,

    /// Variable name to JSONPath expression, evaluated against every successful response.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub runtime_vars: IndexMap<String, JsonPathExpression>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_map_ref: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub http_headers: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Action {
    /// Minimal action with everything optional left empty.
    pub fn new(strategy: Strategy, endpoint: impl Into<String>) -> Self {
        Self {
            strategy,
            endpoint: endpoint.into(),
            get_endpoint_suffix: None,
            post_endpoint_suffix: None,
            put_endpoint_suffix: None,
            patch_endpoint_suffix: None,
            delete_endpoint_suffix: None,
            find_by_json_path_expr: None,
            payload_template: String::new(),
            patch_payload_template: None,
            variables: Variables::new(),
            runtime_vars: IndexMap::new(),
            auth_map_ref: String::new(),
            http_headers: IndexMap::new(),
            order: None,
        }
    }

    pub fn endpoint_suffix(&self, verb: HttpVerb) -> Option<&str> {
        match verb {
            HttpVerb::Get => self.get_endpoint_suffix.as_deref(),
            HttpVerb::Post => self.post_endpoint_suffix.as_deref(),
            HttpVerb::Put => self.put_endpoint_suffix.as_deref(),
            HttpVerb::Patch => self.patch_endpoint_suffix.as_deref(),
            HttpVerb::Delete => self.delete_endpoint_suffix.as_deref(),
        }
    }

    pub fn find_expr(&self) -> &str {
        self.find_by_json_path_expr.as_deref().unwrap_or("")
    }
}
