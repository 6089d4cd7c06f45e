use indexmap::IndexMap;

pub type AnyValue = serde_json::Value;
pub type JsonPathExpression = String;

/// Action-local template variables, in document order.
pub type Variables = IndexMap<String, AnyValue>;
